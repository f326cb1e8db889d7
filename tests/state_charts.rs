use ipl_terminal::aggregate::ChartSet;
use ipl_terminal::dataset::{DeliveryRecord, MatchRecord};
use ipl_terminal::filters::{SeasonFilter, TeamFilter};
use ipl_terminal::sample;
use ipl_terminal::state::{AppState, PromptKind};

fn match_row(
    id: u32,
    season: i32,
    team1: &str,
    team2: &str,
    winner: Option<&str>,
    toss_winner: &str,
    venue: &str,
) -> MatchRecord {
    MatchRecord {
        id,
        season,
        team1: team1.to_string(),
        team2: team2.to_string(),
        winner: winner.map(str::to_string),
        toss_winner: toss_winner.to_string(),
        venue: venue.to_string(),
    }
}

fn ball(
    match_id: u32,
    batsman: &str,
    runs: u32,
    bowler: &str,
    dismissal: Option<&str>,
) -> DeliveryRecord {
    DeliveryRecord {
        match_id,
        batsman: batsman.to_string(),
        batsman_runs: runs,
        bowler: bowler.to_string(),
        dismissal_kind: dismissal.map(str::to_string),
    }
}

fn league_a() -> Vec<MatchRecord> {
    vec![
        match_row(1, 2017, "CSK", "MI", Some("MI"), "CSK", "Wankhede Stadium"),
        match_row(2, 2018, "RCB", "KKR", Some("RCB"), "RCB", "Eden Gardens"),
    ]
}

fn league_b() -> Vec<MatchRecord> {
    vec![
        match_row(7, 2020, "SRH", "DC", Some("DC"), "SRH", "Arun Jaitley Stadium"),
        match_row(8, 2021, "DC", "PBKS", Some("DC"), "DC", "Wankhede Stadium"),
        match_row(9, 2021, "SRH", "PBKS", Some("SRH"), "PBKS", "Eden Gardens"),
    ]
}

#[test]
fn update_before_any_load_is_a_noop() {
    let mut state = AppState::new();
    state.update_charts();
    assert_eq!(state.charts, ChartSet::default());
    assert_eq!(state.applied, None);
    assert_eq!(state.applied_label(), "-");
}

#[test]
fn loading_matches_rebuilds_selectors_and_resets_to_all() {
    let mut state = AppState::new();
    state.set_matches(league_a(), "test");
    state.cycle_season_next();
    state.cycle_team_next();
    assert_eq!(state.season_idx, 1);

    state.set_matches(league_b(), "test");
    assert_eq!(state.season_idx, 0);
    assert_eq!(state.team_idx, 0);
    assert_eq!(state.seasons, vec![2020, 2021]);
    assert_eq!(state.teams, vec!["DC", "PBKS", "SRH"]);
    assert!(state.notice.as_deref().is_some_and(|n| n.contains("3 rows")));
    assert_eq!(state.charts.seasons.len(), 2);
}

#[test]
fn cycling_selectors_changes_nothing_until_update() {
    let mut state = AppState::new();
    state.set_matches(league_b(), "test");
    let before = state.charts.clone();
    assert_eq!(state.applied_label(), "All / All");

    state.cycle_season_next();
    assert_eq!(state.charts, before);
    assert_eq!(state.applied_label(), "All / All");

    state.update_charts();
    assert_eq!(state.charts.seasons.len(), 1);
    assert_eq!(state.charts.seasons[0].season, 2020);
    assert_eq!(state.applied_label(), "2020 / All");
}

#[test]
fn selector_positions_map_to_filters_and_wrap() {
    let mut state = AppState::new();
    state.set_matches(league_b(), "test");
    assert_eq!(state.season_filter(), SeasonFilter::All);

    state.cycle_season_next();
    assert_eq!(state.season_filter(), SeasonFilter::Season(2020));
    state.cycle_team_next();
    assert_eq!(state.team_filter(), TeamFilter::Team("DC".to_string()));

    state.cycle_season_prev();
    assert_eq!(state.season_filter(), SeasonFilter::All);
    state.cycle_season_prev();
    assert_eq!(state.season_filter(), SeasonFilter::Season(2021));
}

#[test]
fn player_charts_wait_for_a_delivery_table() {
    let mut state = AppState::new();
    state.set_matches(league_b(), "test");
    assert_eq!(state.charts.batsmen, None);
    assert_eq!(state.charts.bowlers, None);

    state.set_deliveries(
        vec![
            ball(7, "DA Warner", 6, "R Ashwin", None),
            ball(8, "RR Pant", 2, "JJ Bumrah", Some("caught")),
        ],
        "test",
    );
    let batsmen = state.charts.batsmen.clone().expect("computed after load");
    assert_eq!(batsmen.len(), 2);
    assert_eq!(state.charts.bowlers.as_ref().map(Vec::len), Some(1));
}

#[test]
fn computed_empty_differs_from_skipped() {
    let mut state = AppState::new();
    state.set_matches(league_b(), "test");
    state.set_deliveries(vec![ball(8, "RR Pant", 4, "K Rabada", None)], "test");

    state.cycle_season_next();
    state.update_charts();
    assert_eq!(state.charts.batsmen, Some(Vec::new()));
    assert_eq!(state.charts.bowlers, Some(Vec::new()));
}

#[test]
fn recompute_without_delivery_table_keeps_last_rankings() {
    let mut state = AppState::new();
    state.set_matches(league_b(), "test");
    state.set_deliveries(
        vec![ball(7, "DA Warner", 6, "R Ashwin", Some("bowled"))],
        "test",
    );
    let snapshot = state.charts.batsmen.clone();
    assert!(snapshot.as_ref().is_some_and(|rows| !rows.is_empty()));

    state.deliveries = None;
    state.update_charts();
    assert_eq!(state.charts.batsmen, snapshot);
    assert_eq!(state.charts.bowlers.as_ref().map(Vec::len), Some(1));
}

#[test]
fn set_deliveries_preserves_selector_positions() {
    let mut state = AppState::new();
    state.set_matches(league_b(), "test");
    state.cycle_team_next();
    state.update_charts();

    state.set_deliveries(
        vec![
            ball(7, "DA Warner", 6, "R Ashwin", None),
            ball(9, "JC Buttler", 4, "Rashid Khan", None),
        ],
        "test",
    );
    assert_eq!(state.team_idx, 1);

    let batsmen = state.charts.batsmen.clone().expect("computed after load");
    assert_eq!(batsmen.len(), 1);
    assert_eq!(batsmen[0].name, "DA Warner");
}

#[test]
fn prompt_cancel_is_silent() {
    let mut state = AppState::new();
    state.set_matches(league_a(), "test");
    state.notice = None;
    let logs_before = state.logs.len();
    let charts_before = state.charts.clone();

    state.open_prompt(PromptKind::DeliveriesPath);
    if let Some(prompt) = &mut state.prompt {
        prompt.buffer.push_str("/tmp/nowhere.csv");
    }
    state.cancel_prompt();

    assert!(state.prompt.is_none());
    assert_eq!(state.logs.len(), logs_before);
    assert_eq!(state.charts, charts_before);
    assert_eq!(state.notice, None);
}

#[test]
fn demo_feed_populates_every_chart() {
    let demo = sample::demo_data();
    let mut state = AppState::new();
    state.set_matches(demo.matches, "demo feed");
    state.set_deliveries(demo.deliveries, "demo feed");

    assert_eq!(state.seasons.len(), 6);
    assert_eq!(state.teams.len(), 8);
    assert_eq!(state.charts.seasons.len(), 6);
    assert!(!state.charts.team_wins.is_empty());
    assert!(state.charts.team_wins.len() <= 10);
    assert!(state.charts.toss.decided() > 0);
    assert!(state.charts.batsmen.as_ref().is_some_and(|r| !r.is_empty()));
    assert!(state.charts.bowlers.as_ref().is_some_and(|r| !r.is_empty()));
    assert!(!state.charts.venues.is_empty());
    assert!(state.charts.venues.len() <= 10);

    let snapshot = state.charts.clone();
    state.update_charts();
    assert_eq!(state.charts, snapshot);
}

#[test]
fn console_log_caps_at_two_hundred_lines() {
    let mut state = AppState::new();
    for i in 0..250 {
        state.push_log(format!("[INFO] line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}
