pub use crate::config::*;

/// A builder for assembling the tables of a run.
///
/// The readers of the command line program and the tests use it to add
/// records one at a time.
///
/// ```
/// pub use legislative_tally::builder::Builder;
///
/// let mut builder = Builder::new()
///     .legislator(1, "Anna")
///     .bill(10, "Clean Water Act", Some(1));
///
/// builder.add_vote(&legislative_tally::Vote {
///     id: legislative_tally::VoteId(100),
///     bill_id: legislative_tally::BillId(10),
/// });
///
/// let dataset = builder.build();
/// assert_eq!(dataset.votes.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _bills: Vec<Bill>,
    pub(crate) _legislators: Vec<Legislator>,
    pub(crate) _votes: Vec<Vote>,
    pub(crate) _vote_results: Vec<VoteResult>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn bill(mut self, id: i64, title: &str, sponsor_id: Option<i64>) -> Builder {
        self.add_bill(&Bill {
            id: BillId(id),
            title: title.to_string(),
            sponsor_id: sponsor_id.map(LegislatorId),
        });
        self
    }

    pub fn legislator(mut self, id: i64, name: &str) -> Builder {
        self.add_legislator(&Legislator {
            id: LegislatorId(id),
            name: name.to_string(),
        });
        self
    }

    pub fn vote(mut self, id: i64, bill_id: i64) -> Builder {
        self.add_vote(&Vote {
            id: VoteId(id),
            bill_id: BillId(bill_id),
        });
        self
    }

    /// Adds the ballot of a legislator.
    ///
    /// vote_type: 1 for support, 2 for opposition. Other codes are kept
    /// but not counted.
    pub fn vote_result(mut self, id: i64, legislator_id: i64, vote_id: i64, vote_type: i64) -> Builder {
        self.add_vote_result(&VoteResult {
            id,
            legislator_id: LegislatorId(legislator_id),
            vote_id: VoteId(vote_id),
            vote_type: VoteType::from(vote_type),
        });
        self
    }

    pub fn add_bill(&mut self, bill: &Bill) {
        self._bills.push(bill.clone());
    }

    pub fn add_legislator(&mut self, legislator: &Legislator) {
        self._legislators.push(legislator.clone());
    }

    pub fn add_vote(&mut self, vote: &Vote) {
        self._votes.push(vote.clone());
    }

    pub fn add_vote_result(&mut self, vote_result: &VoteResult) {
        self._vote_results.push(vote_result.clone());
    }

    pub fn build(self) -> Dataset {
        Dataset {
            bills: self._bills,
            legislators: self._legislators,
            votes: self._votes,
            vote_results: self._vote_results,
        }
    }
}
