use std::collections::{BTreeMap, HashMap, HashSet};

use crate::dataset::{DeliveryRecord, MatchRecord};

pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCount {
    pub season: i32,
    pub matches: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCount {
    pub name: String,
    pub value: u64,
}

/// Decided matches split by whether the toss winner also won. No-result
/// games land in neither bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TossSplit {
    pub won_and_won: u64,
    pub won_but_lost: u64,
}

impl TossSplit {
    pub fn decided(&self) -> u64 {
        self.won_and_won + self.won_but_lost
    }
}

/// `batsmen` and `bowlers` stay `None` until a deliveries table has been
/// loaded; a recompute without one leaves their previous values alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSet {
    pub seasons: Vec<SeasonCount>,
    pub team_wins: Vec<RankedCount>,
    pub toss: TossSplit,
    pub batsmen: Option<Vec<RankedCount>>,
    pub bowlers: Option<Vec<RankedCount>>,
    pub venues: Vec<RankedCount>,
}

pub fn matches_per_season(matches: &[&MatchRecord]) -> Vec<SeasonCount> {
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for m in matches {
        *counts.entry(m.season).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(season, matches)| SeasonCount { season, matches })
        .collect()
}

pub fn team_wins(matches: &[&MatchRecord]) -> Vec<RankedCount> {
    let mut wins: HashMap<&str, u64> = HashMap::new();
    for m in matches {
        if let Some(winner) = &m.winner {
            *wins.entry(winner.as_str()).or_insert(0) += 1;
        }
    }
    rank_top(wins)
}

pub fn toss_vs_win(matches: &[&MatchRecord]) -> TossSplit {
    let mut split = TossSplit::default();
    for m in matches {
        let Some(winner) = &m.winner else { continue };
        if *winner == m.toss_winner {
            split.won_and_won += 1;
        } else {
            split.won_but_lost += 1;
        }
    }
    split
}

pub fn top_batsmen(deliveries: &[DeliveryRecord], match_ids: &HashSet<u32>) -> Vec<RankedCount> {
    let mut runs: HashMap<&str, u64> = HashMap::new();
    for d in deliveries {
        if !match_ids.contains(&d.match_id) {
            continue;
        }
        *runs.entry(d.batsman.as_str()).or_insert(0) += u64::from(d.batsman_runs);
    }
    rank_top(runs)
}

pub fn top_bowlers(deliveries: &[DeliveryRecord], match_ids: &HashSet<u32>) -> Vec<RankedCount> {
    let mut wickets: HashMap<&str, u64> = HashMap::new();
    for d in deliveries {
        if !match_ids.contains(&d.match_id) {
            continue;
        }
        if d.dismissal_kind.is_none() {
            continue;
        }
        *wickets.entry(d.bowler.as_str()).or_insert(0) += 1;
    }
    rank_top(wickets)
}

pub fn top_venues(matches: &[&MatchRecord]) -> Vec<RankedCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for m in matches {
        *counts.entry(m.venue.as_str()).or_insert(0) += 1;
    }
    rank_top(counts)
}

// Ties break on name so the ranking never depends on map iteration order.
fn rank_top(counts: HashMap<&str, u64>) -> Vec<RankedCount> {
    let mut rows: Vec<RankedCount> = counts
        .into_iter()
        .map(|(name, value)| RankedCount {
            name: name.to_string(),
            value,
        })
        .collect();
    rows.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    rows.truncate(TOP_N);
    rows
}
