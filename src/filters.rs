use crate::dataset::MatchRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonFilter {
    All,
    Season(i32),
}

impl SeasonFilter {
    pub fn accepts(&self, m: &MatchRecord) -> bool {
        match self {
            SeasonFilter::All => true,
            SeasonFilter::Season(year) => m.season == *year,
        }
    }

    pub fn label(&self) -> String {
        match self {
            SeasonFilter::All => "All".to_string(),
            SeasonFilter::Season(year) => year.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamFilter {
    All,
    Team(String),
}

impl TeamFilter {
    pub fn accepts(&self, m: &MatchRecord) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(team) => m.team1 == *team || m.team2 == *team,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TeamFilter::All => "All",
            TeamFilter::Team(team) => team,
        }
    }
}

pub fn apply_filters<'a>(
    matches: &'a [MatchRecord],
    season: &SeasonFilter,
    team: &TeamFilter,
) -> Vec<&'a MatchRecord> {
    matches
        .iter()
        .filter(|m| season.accepts(m) && team.accepts(m))
        .collect()
}
