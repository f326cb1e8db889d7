use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::{DeliveryRecord, MatchRecord};

const DEMO_SEED: u64 = 26;
const FIRST_SEASON: i32 = 2017;
const DELIVERIES_PER_MATCH: usize = 48;

const TEAMS: [&str; 8] = [
    "Chennai Super Kings",
    "Delhi Capitals",
    "Kolkata Knight Riders",
    "Mumbai Indians",
    "Punjab Kings",
    "Rajasthan Royals",
    "Royal Challengers Bangalore",
    "Sunrisers Hyderabad",
];

const VENUES: [&str; 8] = [
    "Arun Jaitley Stadium",
    "Eden Gardens",
    "M Chinnaswamy Stadium",
    "MA Chidambaram Stadium",
    "Narendra Modi Stadium",
    "Rajiv Gandhi International Stadium",
    "Sawai Mansingh Stadium",
    "Wankhede Stadium",
];

const BATSMEN: [&str; 20] = [
    "V Kohli",
    "RG Sharma",
    "MS Dhoni",
    "DA Warner",
    "S Dhawan",
    "AB de Villiers",
    "KL Rahul",
    "SK Raina",
    "RR Pant",
    "CH Gayle",
    "AM Rahane",
    "F du Plessis",
    "Q de Kock",
    "SV Samson",
    "AD Russell",
    "JC Buttler",
    "KA Pollard",
    "SA Yadav",
    "MK Pandey",
    "SS Iyer",
];

const BOWLERS: [&str; 16] = [
    "JJ Bumrah",
    "R Ashwin",
    "YS Chahal",
    "SP Narine",
    "B Kumar",
    "RA Jadeja",
    "K Rabada",
    "TA Boult",
    "Mohammed Shami",
    "A Mishra",
    "DJ Bravo",
    "SL Malinga",
    "PP Chawla",
    "UT Yadav",
    "Rashid Khan",
    "MM Sharma",
];

const DISMISSALS: [&str; 5] = ["caught", "bowled", "lbw", "run out", "stumped"];

// Per-ball run outcomes, weighted toward dots and singles.
const RUNS_TABLE: [u32; 13] = [0, 0, 0, 0, 1, 1, 1, 2, 2, 3, 4, 4, 6];

pub struct DemoData {
    pub matches: Vec<MatchRecord>,
    pub deliveries: Vec<DeliveryRecord>,
}

pub fn demo_data() -> DemoData {
    demo_data_sized(6, 56)
}

pub fn demo_data_sized(seasons: usize, matches_per_season: usize) -> DemoData {
    let mut rng = StdRng::seed_from_u64(DEMO_SEED);
    let mut matches = Vec::with_capacity(seasons * matches_per_season);
    let mut deliveries = Vec::with_capacity(seasons * matches_per_season * DELIVERIES_PER_MATCH);
    let mut id: u32 = 0;

    for s in 0..seasons {
        let season = FIRST_SEASON + s as i32;
        for _ in 0..matches_per_season {
            id += 1;
            let home = rng.gen_range(0..TEAMS.len());
            let away = (home + 1 + rng.gen_range(0..TEAMS.len() - 1)) % TEAMS.len();
            let (toss, other) = if rng.gen_bool(0.5) {
                (home, away)
            } else {
                (away, home)
            };
            // A small no-result rate, and a mild edge for the toss winner so
            // the toss chart has something to say.
            let winner = if rng.gen_bool(0.04) {
                None
            } else if rng.gen_bool(0.54) {
                Some(TEAMS[toss].to_string())
            } else {
                Some(TEAMS[other].to_string())
            };
            matches.push(MatchRecord {
                id,
                season,
                team1: TEAMS[home].to_string(),
                team2: TEAMS[away].to_string(),
                winner,
                toss_winner: TEAMS[toss].to_string(),
                venue: VENUES[rng.gen_range(0..VENUES.len())].to_string(),
            });

            for _ in 0..DELIVERIES_PER_MATCH {
                let dismissal_kind = if rng.gen_bool(0.05) {
                    Some(DISMISSALS[rng.gen_range(0..DISMISSALS.len())].to_string())
                } else {
                    None
                };
                deliveries.push(DeliveryRecord {
                    match_id: id,
                    batsman: BATSMEN[rng.gen_range(0..BATSMEN.len())].to_string(),
                    batsman_runs: RUNS_TABLE[rng.gen_range(0..RUNS_TABLE.len())],
                    bowler: BOWLERS[rng.gen_range(0..BOWLERS.len())].to_string(),
                    dismissal_kind,
                });
            }
        }
    }

    DemoData {
        matches,
        deliveries,
    }
}
