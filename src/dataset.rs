use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

const MATCH_COLUMNS: [&str; 7] = [
    "id",
    "season",
    "team1",
    "team2",
    "winner",
    "toss_winner",
    "venue",
];

const DELIVERY_COLUMNS: [&str; 5] = [
    "match_id",
    "batsman",
    "batsman_runs",
    "bowler",
    "dismissal_kind",
];

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRecord {
    pub id: u32,
    pub season: i32,
    pub team1: String,
    pub team2: String,
    /// Empty in the CSV when the match produced no result.
    pub winner: Option<String>,
    pub toss_winner: String,
    pub venue: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryRecord {
    pub match_id: u32,
    pub batsman: String,
    pub batsman_runs: u32,
    pub bowler: String,
    /// Set only when the ball took a wicket.
    pub dismissal_kind: Option<String>,
}

pub fn load_matches_csv(path: &Path) -> Result<Vec<MatchRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open matches csv {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read matches csv headers {}", path.display()))?;
    require_columns("matches", headers, &MATCH_COLUMNS, path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<MatchRecord>() {
        let row = record.with_context(|| format!("decode matches csv {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn load_deliveries_csv(path: &Path) -> Result<Vec<DeliveryRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open deliveries csv {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read deliveries csv headers {}", path.display()))?;
    require_columns("deliveries", headers, &DELIVERY_COLUMNS, path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<DeliveryRecord>() {
        let row = record.with_context(|| format!("decode deliveries csv {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

// An absent Option column decodes as all-None rather than a missing-field
// error, so presence has to come from the header row.
fn require_columns(
    label: &str,
    headers: &csv::StringRecord,
    required: &[&str],
    path: &Path,
) -> Result<()> {
    for col in required {
        if !headers.iter().any(|h| h == *col) {
            return Err(anyhow!(
                "{label} csv {} is missing the {col} column",
                path.display()
            ));
        }
    }
    Ok(())
}

pub fn season_values(matches: &[MatchRecord]) -> Vec<i32> {
    let seasons: BTreeSet<i32> = matches.iter().map(|m| m.season).collect();
    seasons.into_iter().collect()
}

pub fn team_values(matches: &[MatchRecord]) -> Vec<String> {
    let mut teams: Vec<String> = matches
        .iter()
        .flat_map(|m| [m.team1.clone(), m.team2.clone()])
        .collect();
    teams.sort();
    teams.dedup();
    teams
}
