/*!
Tallies roll-call votes into two reports:

- for each legislator that voted, the number of distinct bills supported
  and opposed;
- for each bill, the number of distinct supporters and opposers, and the
  name of its primary sponsor.

```
use legislative_tally::builder::Builder;
use legislative_tally::*;

let dataset = Builder::new()
    .bill(10, "Bill A", Some(1))
    .legislator(1, "Biden")
    .vote(100, 10)
    .vote_result(1, 1, 100, 1)
    .build();

let report = run_tally(&dataset);
assert_eq!(report.legislators[0].num_supported_bills, 1);
assert_eq!(report.bills[0].primary_sponsor, "Biden");
```

See the [manual] for the input and output formats of the `legtally` program.
*/
mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

pub use crate::config::*;

/// The sponsor name reported when a bill has no sponsor, or when the sponsor
/// is not a known legislator.
pub const UNKNOWN_SPONSOR: &str = "Unknown";

// **** Private structures ****

/// Accumulates, for each key, the set of distinct counterparts seen with it.
struct DistinctCounter<K, V> {
    groups: HashMap<K, HashSet<V>>,
}

impl<K: Eq + Hash, V: Eq + Hash> DistinctCounter<K, V> {
    fn new() -> DistinctCounter<K, V> {
        DistinctCounter {
            groups: HashMap::new(),
        }
    }

    fn add(&mut self, key: K, value: V) {
        self.groups.entry(key).or_default().insert(value);
    }

    /// The number of distinct counterparts for this key, 0 if never seen.
    fn count(&self, key: &K) -> u64 {
        self.groups.get(key).map(|s| s.len() as u64).unwrap_or(0)
    }
}

/// Counts distinct counterparts per key, only for the results with the given vote type.
fn count_distinct<K, V>(
    vote_results: &[NormalizedVoteResult],
    vote_type: VoteType,
    key: impl Fn(&NormalizedVoteResult) -> K,
    counterpart: impl Fn(&NormalizedVoteResult) -> V,
) -> DistinctCounter<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    let mut counter = DistinctCounter::new();
    for vr in vote_results.iter().filter(|vr| vr.vote_type == vote_type) {
        counter.add(key(vr), counterpart(vr));
    }
    counter
}

/// Resolves sponsor ids to legislator names.
struct SponsorDirectory<'a> {
    names: HashMap<LegislatorId, &'a str>,
}

impl<'a> SponsorDirectory<'a> {
    fn new(legislators: &'a [Legislator]) -> SponsorDirectory<'a> {
        let mut names: HashMap<LegislatorId, &'a str> = HashMap::new();
        for l in legislators.iter() {
            // The first legislator registered with an id wins.
            names.entry(l.id).or_insert(l.name.as_str());
        }
        SponsorDirectory { names }
    }

    fn resolve(&self, sponsor_id: Option<LegislatorId>) -> String {
        match sponsor_id.and_then(|lid| self.names.get(&lid)) {
            Some(name) => name.to_string(),
            None => {
                debug!("resolve: sponsor {:?} is not a known legislator", sponsor_id);
                UNKNOWN_SPONSOR.to_string()
            }
        }
    }
}

/// Attaches to every vote result the bill it was cast on.
///
/// The vote results whose `vote_id` does not match any vote are dropped. A
/// vote id that appears several times in `votes` produces one row per match.
pub fn normalize_votes(votes: &[Vote], vote_results: &[VoteResult]) -> Vec<NormalizedVoteResult> {
    let mut bills_by_vote: HashMap<VoteId, Vec<BillId>> = HashMap::new();
    for v in votes.iter() {
        bills_by_vote.entry(v.id).or_default().push(v.bill_id);
    }

    let mut res: Vec<NormalizedVoteResult> = Vec::new();
    for vr in vote_results.iter() {
        if let Some(bill_ids) = bills_by_vote.get(&vr.vote_id) {
            for bill_id in bill_ids.iter() {
                res.push(NormalizedVoteResult {
                    id: vr.id,
                    legislator_id: vr.legislator_id,
                    vote_id: vr.vote_id,
                    vote_type: vr.vote_type,
                    bill_id: *bill_id,
                });
            }
        } else {
            debug!(
                "normalize_votes: dropping vote result {} with unknown vote {}",
                vr.id, vr.vote_id
            );
        }
    }
    debug!(
        "normalize_votes: {} vote results -> {} normalized",
        vote_results.len(),
        res.len()
    );
    res
}

/// For every legislator that voted at least once, counts the distinct bills
/// supported and opposed.
///
/// Legislators are returned in the order of the input table.
pub fn compute_legislator_support(
    vote_results: &[NormalizedVoteResult],
    legislators: &[Legislator],
) -> Vec<LegislatorSupport> {
    let supported = count_distinct(
        vote_results,
        VoteType::Support,
        |vr| vr.legislator_id,
        |vr| vr.bill_id,
    );
    let opposed = count_distinct(
        vote_results,
        VoteType::Oppose,
        |vr| vr.legislator_id,
        |vr| vr.bill_id,
    );

    // Any vote type makes a legislator a voter, even if it is not counted.
    let voters: HashSet<LegislatorId> = vote_results.iter().map(|vr| vr.legislator_id).collect();

    legislators
        .iter()
        .filter(|l| voters.contains(&l.id))
        .map(|l| LegislatorSupport {
            id: l.id,
            name: l.name.clone(),
            num_supported_bills: supported.count(&l.id),
            num_opposed_bills: opposed.count(&l.id),
        })
        .collect()
}

/// For every bill, counts the distinct supporters and opposers, and resolves
/// the name of the primary sponsor.
///
/// Bills without votes are still reported, with zero counts. Bills are
/// returned in the order of the input table.
pub fn compute_bill_support_counts(
    vote_results: &[NormalizedVoteResult],
    bills: &[Bill],
    legislators: &[Legislator],
) -> Vec<BillSupport> {
    let supporters = count_distinct(
        vote_results,
        VoteType::Support,
        |vr| vr.bill_id,
        |vr| vr.legislator_id,
    );
    let opposers = count_distinct(
        vote_results,
        VoteType::Oppose,
        |vr| vr.bill_id,
        |vr| vr.legislator_id,
    );
    let sponsors = SponsorDirectory::new(legislators);

    bills
        .iter()
        .map(|b| BillSupport {
            id: b.id,
            title: b.title.clone(),
            supporter_count: supporters.count(&b.id),
            opposer_count: opposers.count(&b.id),
            primary_sponsor: sponsors.resolve(b.sponsor_id),
        })
        .collect()
}

/// Runs the whole pipeline over a dataset.
pub fn run_tally(dataset: &Dataset) -> TallyReport {
    info!(
        "run_tally: Processing {} bills, {} legislators, {} votes, {} vote results",
        dataset.bills.len(),
        dataset.legislators.len(),
        dataset.votes.len(),
        dataset.vote_results.len()
    );
    let normalized = normalize_votes(&dataset.votes, &dataset.vote_results);
    let known_votes: HashSet<VoteId> = dataset.votes.iter().map(|v| v.id).collect();
    let num_dropped = dataset
        .vote_results
        .iter()
        .filter(|vr| !known_votes.contains(&vr.vote_id))
        .count();
    if num_dropped > 0 {
        info!(
            "run_tally: {} vote results did not match any vote",
            num_dropped
        );
    }

    let legislators = compute_legislator_support(&normalized, &dataset.legislators);
    let bills = compute_bill_support_counts(&normalized, &dataset.bills, &dataset.legislators);
    info!(
        "run_tally: {} legislators voted, {} bills reported",
        legislators.len(),
        bills.len()
    );

    TallyReport {
        legislators,
        bills,
        num_vote_results: dataset.vote_results.len(),
        num_normalized_vote_results: normalized.len(),
        num_dropped_vote_results: num_dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::builder::Builder;
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn mock_dataset() -> Dataset {
        Builder::new()
            .bill(10, "Bill A", Some(1))
            .bill(11, "Bill B", None)
            .legislator(1, "Biden")
            .legislator(2, "Trump")
            // Never votes
            .legislator(3, "Sanders")
            .vote(100, 10)
            .vote(101, 11)
            .vote_result(1, 1, 100, 1)
            .vote_result(2, 2, 100, 2)
            .vote_result(3, 2, 101, 1)
            .build()
    }

    fn nvr(legislator_id: i64, bill_id: i64, vote_type: i64) -> NormalizedVoteResult {
        NormalizedVoteResult {
            id: 0,
            legislator_id: LegislatorId(legislator_id),
            vote_id: VoteId(bill_id * 10),
            vote_type: VoteType::from(vote_type),
            bill_id: BillId(bill_id),
        }
    }

    fn leg(id: i64, name: &str) -> Legislator {
        Legislator {
            id: LegislatorId(id),
            name: name.to_string(),
        }
    }

    fn bill(id: i64, title: &str, sponsor_id: Option<i64>) -> Bill {
        Bill {
            id: BillId(id),
            title: title.to_string(),
            sponsor_id: sponsor_id.map(LegislatorId),
        }
    }

    fn leg_row(id: i64, name: &str, supported: u64, opposed: u64) -> LegislatorSupport {
        LegislatorSupport {
            id: LegislatorId(id),
            name: name.to_string(),
            num_supported_bills: supported,
            num_opposed_bills: opposed,
        }
    }

    fn bill_row(id: i64, title: &str, sup: u64, opp: u64, sponsor: &str) -> BillSupport {
        BillSupport {
            id: BillId(id),
            title: title.to_string(),
            supporter_count: sup,
            opposer_count: opp,
            primary_sponsor: sponsor.to_string(),
        }
    }

    #[test]
    fn normalize_votes_attaches_bill() {
        init();
        let ds = mock_dataset();
        let vr = normalize_votes(&ds.votes, &ds.vote_results);
        assert_eq!(vr.len(), 3);
        let bills: Vec<(i64, i64)> = vr.iter().map(|r| (r.id, r.bill_id.0)).collect();
        assert_eq!(bills, vec![(1, 10), (2, 10), (3, 11)]);
        assert_eq!(vr[1].legislator_id, LegislatorId(2));
        assert_eq!(vr[1].vote_id, VoteId(100));
        assert_eq!(vr[1].vote_type, VoteType::Oppose);
    }

    #[test]
    fn normalize_votes_drops_unknown_vote() {
        init();
        let ds = Builder::new()
            .vote(100, 10)
            .vote_result(1, 1, 100, 1)
            .vote_result(2, 1, 999, 1)
            .build();
        let vr = normalize_votes(&ds.votes, &ds.vote_results);
        assert_eq!(ds.vote_results.len(), 2);
        assert_eq!(vr.len(), 1);
        assert_eq!(vr[0].id, 1);
    }

    #[test]
    fn normalize_votes_duplicate_vote_id_fans_out() {
        let ds = Builder::new()
            .vote(100, 10)
            .vote(100, 11)
            .vote_result(1, 1, 100, 1)
            .build();
        let vr = normalize_votes(&ds.votes, &ds.vote_results);
        let bills: Vec<BillId> = vr.iter().map(|r| r.bill_id).collect();
        assert_eq!(bills, vec![BillId(10), BillId(11)]);
    }

    #[test]
    fn legislator_support_counts() {
        init();
        let ds = mock_dataset();
        let vr = normalize_votes(&ds.votes, &ds.vote_results);
        let res = compute_legislator_support(&vr, &ds.legislators);
        // Sanders never voted.
        assert_eq!(
            res,
            vec![leg_row(1, "Biden", 1, 0), leg_row(2, "Trump", 1, 1)]
        );
    }

    #[test]
    fn legislator_support_only_yes_or_no() {
        init();
        let legislators = vec![leg(1, "yes_only"), leg(2, "no_only")];
        let vr = vec![nvr(1, 10, 1), nvr(1, 11, 1), nvr(2, 12, 2)];
        let res = compute_legislator_support(&vr, &legislators);
        assert_eq!(
            res,
            vec![leg_row(1, "yes_only", 2, 0), leg_row(2, "no_only", 0, 1)]
        );
    }

    #[test]
    fn legislator_support_counts_distinct_bills() {
        let legislators = vec![leg(1, "twice")];
        let vr = vec![nvr(1, 10, 1), nvr(1, 10, 1), nvr(1, 11, 2)];
        let res = compute_legislator_support(&vr, &legislators);
        assert_eq!(res, vec![leg_row(1, "twice", 1, 1)]);
    }

    #[test]
    fn legislator_with_other_vote_type_is_listed_without_counts() {
        let legislators = vec![leg(1, "present"), leg(2, "absent")];
        let vr = vec![nvr(1, 10, 3), nvr(1, 11, 1)];
        let res = compute_legislator_support(&vr, &legislators);
        assert_eq!(res, vec![leg_row(1, "present", 1, 0)]);

        let vr = vec![nvr(2, 10, 4)];
        let res = compute_legislator_support(&vr, &legislators);
        assert_eq!(res, vec![leg_row(2, "absent", 0, 0)]);
    }

    #[test]
    fn legislator_counts_bounded_by_distinct_bills() {
        let legislators = vec![leg(1, "a"), leg(2, "b")];
        let vr = vec![
            nvr(1, 10, 1),
            nvr(1, 11, 2),
            nvr(1, 12, 5),
            nvr(2, 10, 1),
            nvr(2, 11, 1),
        ];
        let res = compute_legislator_support(&vr, &legislators);
        for row in res.iter() {
            let distinct_bills: HashSet<BillId> = vr
                .iter()
                .filter(|r| r.legislator_id == row.id)
                .map(|r| r.bill_id)
                .collect();
            assert!(row.num_supported_bills + row.num_opposed_bills <= distinct_bills.len() as u64);
        }
        assert_eq!(res[1].num_supported_bills, 2);
    }

    #[test]
    fn bill_support_counts_and_unknown_sponsor() {
        init();
        let ds = mock_dataset();
        let vr = normalize_votes(&ds.votes, &ds.vote_results);
        let res = compute_bill_support_counts(&vr, &ds.bills, &ds.legislators);
        assert_eq!(
            res,
            vec![
                bill_row(10, "Bill A", 1, 1, "Biden"),
                bill_row(11, "Bill B", 1, 0, "Unknown"),
            ]
        );
    }

    #[test]
    fn bill_with_no_votes_has_zero_counts() {
        init();
        let bills = vec![bill(10, "Bill A", None), bill(11, "Bill B", None)];
        let legislators = vec![leg(1, "Biden")];
        let vr = vec![nvr(1, 10, 1)];
        let res = compute_bill_support_counts(&vr, &bills, &legislators);
        assert_eq!(
            res,
            vec![
                bill_row(10, "Bill A", 1, 0, "Unknown"),
                bill_row(11, "Bill B", 0, 0, "Unknown"),
            ]
        );
    }

    #[test]
    fn bill_sponsor_not_a_legislator() {
        let bills = vec![bill(10, "Orphan", Some(42))];
        let legislators = vec![leg(1, "Biden")];
        let res = compute_bill_support_counts(&[], &bills, &legislators);
        assert_eq!(res, vec![bill_row(10, "Orphan", 0, 0, UNKNOWN_SPONSOR)]);
    }

    #[test]
    fn bill_counts_distinct_legislators() {
        let bills = vec![bill(10, "Bill A", Some(2))];
        let legislators = vec![leg(1, "a"), leg(2, "b"), leg(2, "b duplicate")];
        let vr = vec![nvr(1, 10, 1), nvr(1, 10, 1), nvr(2, 10, 2), nvr(3, 10, 7)];
        let res = compute_bill_support_counts(&vr, &bills, &legislators);
        assert_eq!(res, vec![bill_row(10, "Bill A", 1, 1, "b")]);
    }

    #[test]
    fn run_tally_end_to_end() {
        init();
        let mut ds = mock_dataset();
        ds.vote_results.push(VoteResult {
            id: 4,
            legislator_id: LegislatorId(3),
            vote_id: VoteId(555),
            vote_type: VoteType::Support,
        });
        let report = run_tally(&ds);
        assert_eq!(report.num_vote_results, 4);
        assert_eq!(report.num_normalized_vote_results, 3);
        assert_eq!(report.num_dropped_vote_results, 1);
        // The unmatched vote result does not make Sanders a voter.
        assert_eq!(
            report.legislators,
            vec![leg_row(1, "Biden", 1, 0), leg_row(2, "Trump", 1, 1)]
        );
        assert_eq!(report.bills.len(), ds.bills.len());
        assert_eq!(report.bills[1].primary_sponsor, UNKNOWN_SPONSOR);

        // Same input, same output.
        assert_eq!(run_tally(&ds), report);
    }

    #[test]
    fn run_tally_empty_dataset() {
        let report = run_tally(&Dataset::default());
        assert!(report.legislators.is_empty());
        assert!(report.bills.is_empty());
        assert_eq!(report.num_normalized_vote_results, 0);
        assert_eq!(report.num_dropped_vote_results, 0);
    }

    #[test]
    fn run_tally_counts_dropped_rows_despite_fan_out() {
        let ds = Builder::new()
            .bill(10, "Bill A", None)
            .bill(11, "Bill B", None)
            .legislator(1, "Biden")
            .vote(100, 10)
            .vote(100, 11)
            .vote_result(1, 1, 100, 1)
            .vote_result(2, 1, 555, 1)
            .build();
        let report = run_tally(&ds);
        assert_eq!(report.num_vote_results, 2);
        assert_eq!(report.num_normalized_vote_results, 2);
        assert_eq!(report.num_dropped_vote_results, 1);
        assert_eq!(report.legislators, vec![leg_row(1, "Biden", 2, 0)]);
    }

    #[test]
    fn vote_type_codes() {
        assert_eq!(VoteType::from(1), VoteType::Support);
        assert_eq!(VoteType::from(2), VoteType::Oppose);
        assert_eq!(VoteType::from(0), VoteType::Other(0));
        assert_eq!(VoteType::Other(5).code(), 5);
        assert_eq!(VoteType::Oppose.code(), 2);
    }
}
