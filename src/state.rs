use std::collections::{HashSet, VecDeque};

use chrono::Local;

use crate::aggregate::{self, ChartSet};
use crate::dataset::{self, DeliveryRecord, MatchRecord};
use crate::filters::{self, SeasonFilter, TeamFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTab {
    SeasonMatches,
    TeamWins,
    TossVsWin,
    TopBatsmen,
    TopBowlers,
    Venues,
}

impl ChartTab {
    pub const ALL: [ChartTab; 6] = [
        ChartTab::SeasonMatches,
        ChartTab::TeamWins,
        ChartTab::TossVsWin,
        ChartTab::TopBatsmen,
        ChartTab::TopBowlers,
        ChartTab::Venues,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartTab::SeasonMatches => "Matches per Season",
            ChartTab::TeamWins => "Team Wins",
            ChartTab::TossVsWin => "Toss vs Win",
            ChartTab::TopBatsmen => "Top Batsmen",
            ChartTab::TopBowlers => "Top Bowlers",
            ChartTab::Venues => "Venues",
        }
    }

    pub fn index(self) -> usize {
        ChartTab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> ChartTab {
        ChartTab::ALL[(self.index() + 1) % ChartTab::ALL.len()]
    }

    pub fn prev(self) -> ChartTab {
        let len = ChartTab::ALL.len();
        ChartTab::ALL[(self.index() + len - 1) % len]
    }

    pub fn from_digit(c: char) -> Option<ChartTab> {
        let idx = c.to_digit(10)? as usize;
        if idx == 0 {
            return None;
        }
        ChartTab::ALL.get(idx - 1).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    MatchesPath,
    DeliveriesPath,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::MatchesPath => "Load matches CSV",
            PromptKind::DeliveriesPath => "Load deliveries CSV",
        }
    }
}

/// In-flight path entry for one of the load actions.
#[derive(Debug, Clone)]
pub struct PathPrompt {
    pub kind: PromptKind,
    pub buffer: String,
}

impl PathPrompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            buffer: String::new(),
        }
    }
}

/// The whole dashboard session: loaded tables, selector positions, the
/// current chart set, and the console log. Charts are only recomputed by
/// `update_charts`; moving a selector alone changes nothing on screen.
#[derive(Debug, Clone)]
pub struct AppState {
    pub matches: Option<Vec<MatchRecord>>,
    pub deliveries: Option<Vec<DeliveryRecord>>,
    /// Selector value lists rebuilt on every matches load.
    pub seasons: Vec<i32>,
    pub teams: Vec<String>,
    /// Selector positions; 0 is the `All` sentinel, `n` is list entry `n - 1`.
    pub season_idx: usize,
    pub team_idx: usize,
    /// Filters the current charts were computed under, for the filter bar.
    pub applied: Option<(SeasonFilter, TeamFilter)>,
    pub charts: ChartSet,
    pub tab: ChartTab,
    pub logs: VecDeque<String>,
    pub notice: Option<String>,
    pub prompt: Option<PathPrompt>,
    pub help_overlay: bool,
    pub matches_loaded_at: Option<String>,
    pub deliveries_loaded_at: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            matches: None,
            deliveries: None,
            seasons: Vec::new(),
            teams: Vec::new(),
            season_idx: 0,
            team_idx: 0,
            applied: None,
            charts: ChartSet::default(),
            tab: ChartTab::SeasonMatches,
            logs: VecDeque::new(),
            notice: None,
            prompt: None,
            help_overlay: false,
            matches_loaded_at: None,
            deliveries_loaded_at: None,
        }
    }

    pub fn season_filter(&self) -> SeasonFilter {
        if self.season_idx == 0 {
            return SeasonFilter::All;
        }
        self.seasons
            .get(self.season_idx - 1)
            .copied()
            .map(SeasonFilter::Season)
            .unwrap_or(SeasonFilter::All)
    }

    pub fn team_filter(&self) -> TeamFilter {
        if self.team_idx == 0 {
            return TeamFilter::All;
        }
        self.teams
            .get(self.team_idx - 1)
            .cloned()
            .map(TeamFilter::Team)
            .unwrap_or(TeamFilter::All)
    }

    pub fn season_label(&self) -> String {
        self.season_filter().label()
    }

    pub fn team_label(&self) -> String {
        self.team_filter().label().to_string()
    }

    /// Label for the filters the charts currently reflect, `-` before the
    /// first computation.
    pub fn applied_label(&self) -> String {
        match &self.applied {
            Some((season, team)) => format!("{} / {}", season.label(), team.label()),
            None => "-".to_string(),
        }
    }

    pub fn cycle_season_next(&mut self) {
        let total = self.seasons.len() + 1;
        self.season_idx = (self.season_idx + 1) % total;
    }

    pub fn cycle_season_prev(&mut self) {
        let total = self.seasons.len() + 1;
        self.season_idx = (self.season_idx + total - 1) % total;
    }

    pub fn cycle_team_next(&mut self) {
        let total = self.teams.len() + 1;
        self.team_idx = (self.team_idx + 1) % total;
    }

    pub fn cycle_team_prev(&mut self) {
        let total = self.teams.len() + 1;
        self.team_idx = (self.team_idx + total - 1) % total;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    /// Installs a fresh match table: selector lists are rebuilt from it,
    /// both selectors snap back to `All`, and every chart is recomputed.
    pub fn set_matches(&mut self, rows: Vec<MatchRecord>, source: &str) {
        self.seasons = dataset::season_values(&rows);
        self.teams = dataset::team_values(&rows);
        self.season_idx = 0;
        self.team_idx = 0;
        let count = rows.len();
        self.matches = Some(rows);
        self.matches_loaded_at = Some(now_stamp());
        self.notice = Some(format!("Matches loaded: {count} rows ({source})"));
        self.push_log(format!("[INFO] Matches loaded: {count} rows ({source})"));
        self.update_charts();
    }

    /// Installs a fresh delivery table. Selector positions survive; charts
    /// recompute under whatever is currently selected.
    pub fn set_deliveries(&mut self, rows: Vec<DeliveryRecord>, source: &str) {
        let count = rows.len();
        self.deliveries = Some(rows);
        self.deliveries_loaded_at = Some(now_stamp());
        self.notice = Some(format!("Deliveries loaded: {count} rows ({source})"));
        self.push_log(format!("[INFO] Deliveries loaded: {count} rows ({source})"));
        self.update_charts();
    }

    /// Recomputes the chart set from the current selector positions. Without
    /// a match table this is a no-op; without a delivery table the two
    /// player charts keep whatever they last showed.
    pub fn update_charts(&mut self) {
        let season = self.season_filter();
        let team = self.team_filter();
        let Some(matches) = self.matches.as_deref() else {
            return;
        };
        let filtered = filters::apply_filters(matches, &season, &team);
        self.charts.seasons = aggregate::matches_per_season(&filtered);
        self.charts.team_wins = aggregate::team_wins(&filtered);
        self.charts.toss = aggregate::toss_vs_win(&filtered);
        self.charts.venues = aggregate::top_venues(&filtered);
        if let Some(deliveries) = self.deliveries.as_deref() {
            let ids: HashSet<u32> = filtered.iter().map(|m| m.id).collect();
            self.charts.batsmen = Some(aggregate::top_batsmen(deliveries, &ids));
            self.charts.bowlers = Some(aggregate::top_bowlers(deliveries, &ids));
        }
        self.applied = Some((season, team));
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(PathPrompt::new(kind));
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn take_prompt(&mut self) -> Option<PathPrompt> {
        self.prompt.take()
    }

    pub fn matches_status(&self) -> String {
        table_status(self.matches.as_ref().map(Vec::len), &self.matches_loaded_at)
    }

    pub fn deliveries_status(&self) -> String {
        table_status(
            self.deliveries.as_ref().map(Vec::len),
            &self.deliveries_loaded_at,
        )
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

fn table_status(rows: Option<usize>, loaded_at: &Option<String>) -> String {
    match (rows, loaded_at) {
        (Some(n), Some(at)) => format!("{n} rows (loaded {at})"),
        (Some(n), None) => format!("{n} rows"),
        _ => "none".to_string(),
    }
}

fn now_stamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycle_wraps_both_ways() {
        assert_eq!(ChartTab::Venues.next(), ChartTab::SeasonMatches);
        assert_eq!(ChartTab::SeasonMatches.prev(), ChartTab::Venues);
        assert_eq!(ChartTab::from_digit('3'), Some(ChartTab::TossVsWin));
        assert_eq!(ChartTab::from_digit('7'), None);
        assert_eq!(ChartTab::from_digit('0'), None);
    }

    #[test]
    fn selector_cycle_is_safe_with_empty_lists() {
        let mut state = AppState::new();
        state.cycle_season_next();
        state.cycle_team_prev();
        assert_eq!(state.season_idx, 0);
        assert_eq!(state.team_idx, 0);
        assert_eq!(state.season_filter(), SeasonFilter::All);
        assert_eq!(state.team_filter(), TeamFilter::All);
    }
}
