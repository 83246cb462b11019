// ********* Input data structures ***********

use std::fmt::Display;

/// The identifier of a legislator.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct LegislatorId(pub i64);

/// The identifier of a bill.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct BillId(pub i64);

/// The identifier of a vote (the ballot held on a bill).
///
/// In the vote table it is the primary key; in the vote results it is the
/// foreign key `vote_id`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct VoteId(pub i64);

impl Display for LegislatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for BillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for VoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The choice cast by a legislator on a vote.
///
/// Only `Support` and `Oppose` are counted. Any other code (absent, excused,
/// ...) is kept so that the legislator still counts as having voted.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum VoteType {
    Support,
    Oppose,
    Other(i64),
}

impl VoteType {
    pub const SUPPORT_CODE: i64 = 1;
    pub const OPPOSE_CODE: i64 = 2;

    pub fn code(&self) -> i64 {
        match self {
            VoteType::Support => VoteType::SUPPORT_CODE,
            VoteType::Oppose => VoteType::OPPOSE_CODE,
            VoteType::Other(c) => *c,
        }
    }
}

impl From<i64> for VoteType {
    fn from(code: i64) -> VoteType {
        match code {
            VoteType::SUPPORT_CODE => VoteType::Support,
            VoteType::OPPOSE_CODE => VoteType::Oppose,
            c => VoteType::Other(c),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Bill {
    pub id: BillId,
    pub title: String,
    pub sponsor_id: Option<LegislatorId>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Legislator {
    pub id: LegislatorId,
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Vote {
    pub id: VoteId,
    pub bill_id: BillId,
}

/// A single legislator's ballot on a vote.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteResult {
    pub id: i64,
    pub legislator_id: LegislatorId,
    pub vote_id: VoteId,
    pub vote_type: VoteType,
}

/// The four tables of one run.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Dataset {
    pub bills: Vec<Bill>,
    pub legislators: Vec<Legislator>,
    pub votes: Vec<Vote>,
    pub vote_results: Vec<VoteResult>,
}

// ******** Output data structures *********

/// A vote result with the bill it was cast on.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NormalizedVoteResult {
    pub id: i64,
    pub legislator_id: LegislatorId,
    pub vote_id: VoteId,
    pub vote_type: VoteType,
    pub bill_id: BillId,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LegislatorSupport {
    pub id: LegislatorId,
    pub name: String,
    pub num_supported_bills: u64,
    pub num_opposed_bills: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BillSupport {
    pub id: BillId,
    pub title: String,
    pub supporter_count: u64,
    pub opposer_count: u64,
    pub primary_sponsor: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyReport {
    pub legislators: Vec<LegislatorSupport>,
    pub bills: Vec<BillSupport>,
    /// Number of vote results in the input
    pub num_vote_results: usize,
    /// Number of rows after joining with the votes. A vote id listed twice
    /// in the votes table yields two rows.
    pub num_normalized_vote_results: usize,
    /// Number of vote results whose vote id is not in the votes table
    pub num_dropped_vote_results: usize,
}
