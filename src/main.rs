use std::env;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Tabs};

use ipl_terminal::aggregate::RankedCount;
use ipl_terminal::dataset;
use ipl_terminal::sample;
use ipl_terminal::state::{AppState, ChartTab, PathPrompt, PromptKind};

struct App {
    state: AppState,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    fn new() -> Self {
        let tick_ms = env::var("IPL_TICK_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .max(50);
        Self {
            state: AppState::new(),
            should_quit: false,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        // A visible notice swallows the next keypress.
        if self.state.notice.take().is_some() {
            return;
        }
        if self.state.prompt.is_some() {
            self.on_prompt_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            KeyCode::Char('m') => self.state.open_prompt(PromptKind::MatchesPath),
            KeyCode::Char('d') => self.state.open_prompt(PromptKind::DeliveriesPath),
            KeyCode::Char('g') => self.load_demo(),
            KeyCode::Char('s') => self.state.cycle_season_next(),
            KeyCode::Char('S') => self.state.cycle_season_prev(),
            KeyCode::Char('t') => self.state.cycle_team_next(),
            KeyCode::Char('T') => self.state.cycle_team_prev(),
            KeyCode::Char('a') | KeyCode::Enter => self.state.update_charts(),
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(tab) = ChartTab::from_digit(c) {
                    self.state.tab = tab;
                }
            }
            KeyCode::Tab | KeyCode::Right => self.state.next_tab(),
            KeyCode::BackTab | KeyCode::Left => self.state.prev_tab(),
            _ => {}
        }
    }

    fn on_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.cancel_prompt(),
            KeyCode::Enter => {
                let Some(prompt) = self.state.take_prompt() else {
                    return;
                };
                let raw = prompt.buffer.trim().to_string();
                if raw.is_empty() {
                    return;
                }
                match prompt.kind {
                    PromptKind::MatchesPath => self.load_matches_from(Path::new(&raw)),
                    PromptKind::DeliveriesPath => self.load_deliveries_from(Path::new(&raw)),
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = &mut self.state.prompt {
                    prompt.buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = &mut self.state.prompt {
                    prompt.buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn load_matches_from(&mut self, path: &Path) {
        match dataset::load_matches_csv(path) {
            Ok(rows) => {
                let source = path.display().to_string();
                self.state.set_matches(rows, &source);
            }
            Err(err) => {
                self.state
                    .push_log(format!("[WARN] Matches load failed: {err:#}"));
            }
        }
    }

    fn load_deliveries_from(&mut self, path: &Path) {
        match dataset::load_deliveries_csv(path) {
            Ok(rows) => {
                let source = path.display().to_string();
                self.state.set_deliveries(rows, &source);
            }
            Err(err) => {
                self.state
                    .push_log(format!("[WARN] Deliveries load failed: {err:#}"));
            }
        }
    }

    fn load_demo(&mut self) {
        let demo = sample::demo_data();
        let n_matches = demo.matches.len();
        let n_deliveries = demo.deliveries.len();
        self.state.set_matches(demo.matches, "demo feed");
        self.state.set_deliveries(demo.deliveries, "demo feed");
        self.state.notice = Some(format!(
            "Demo feed loaded: {n_matches} matches, {n_deliveries} deliveries"
        ));
    }

    fn preload_from_env(&mut self) {
        if let Ok(path) = env::var("IPL_MATCHES_CSV") {
            if !path.trim().is_empty() {
                self.load_matches_from(Path::new(path.trim()));
            }
        }
        if let Ok(path) = env::var("IPL_DELIVERIES_CSV") {
            if !path.trim().is_empty() {
                self.load_deliveries_from(Path::new(path.trim()));
            }
        }
        if self.state.matches.is_none() && demo_env_enabled() {
            self.load_demo();
        }
        // Preload runs before the first frame; no popup for it.
        self.state.notice = None;
    }
}

fn demo_env_enabled() -> bool {
    matches!(
        env::var("IPL_DEMO").ok().as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new();
    app.preload_from_env();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_filter_bar(frame, chunks[1], &app.state);
    render_tabs(frame, chunks[2], &app.state);
    render_chart_body(frame, chunks[3], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[4]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[5]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
    if let Some(prompt) = &app.state.prompt {
        render_prompt_popup(frame, frame.size(), prompt);
    }
    if let Some(notice) = &app.state.notice {
        render_notice_popup(frame, frame.size(), notice);
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!("IPL TERMINAL | {}", state.tab.title());
    let line2 = format!(
        "matches: {} | deliveries: {}",
        state.matches_status(),
        state.deliveries_status()
    );
    format!("{line1}\n{line2}")
}

/// Pending selector values plus the filters the charts were last computed
/// under, so a cycled-but-unapplied selector is visible at a glance.
fn render_filter_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let dim = Style::default().fg(Color::DarkGray);
    let pending = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled("Season ", dim),
        Span::styled(format!("< {} >", state.season_label()), pending),
        Span::styled("   Team ", dim),
        Span::styled(format!("< {} >", state.team_label()), pending),
        Span::styled("   charts: ", dim),
        Span::raw(state.applied_label()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn footer_text(state: &AppState) -> String {
    if state.notice.is_some() {
        return "Press any key to continue".to_string();
    }
    if state.prompt.is_some() {
        return "Type a path | Enter Load | Esc Cancel".to_string();
    }
    "m Matches | d Deliveries | g Demo | s/S Season | t/T Team | a/Enter Apply | 1-6 ←/→ Charts | ? Help | q Quit"
        .to_string()
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = ChartTab::ALL
        .iter()
        .map(|tab| Line::from(tab.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    frame.render_widget(tabs, area);
}

fn render_chart_body(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.matches.is_none() {
        let block = Block::default()
            .title(state.tab.title())
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        render_hint(
            frame,
            inner,
            "No match table loaded. Press 'm' to load a CSV or 'g' for the demo feed.",
        );
        return;
    }

    match state.tab {
        ChartTab::SeasonMatches => render_season_chart(frame, area, state),
        ChartTab::TeamWins => render_ranked_chart(
            frame,
            area,
            "Top 10 Teams by Wins",
            "wins",
            &state.charts.team_wins,
            Color::Green,
            "No wins recorded for this filter",
        ),
        ChartTab::TossVsWin => render_toss_chart(frame, area, state),
        ChartTab::TopBatsmen => match &state.charts.batsmen {
            Some(rows) => render_ranked_chart(
                frame,
                area,
                "Top 10 Batsmen by Runs",
                "runs",
                rows,
                Color::Magenta,
                "No deliveries for this filter",
            ),
            None => render_missing_deliveries(frame, area, "Top 10 Batsmen by Runs"),
        },
        ChartTab::TopBowlers => match &state.charts.bowlers {
            Some(rows) => render_ranked_chart(
                frame,
                area,
                "Top 10 Bowlers by Wickets",
                "wkts",
                rows,
                Color::Blue,
                "No wickets for this filter",
            ),
            None => render_missing_deliveries(frame, area, "Top 10 Bowlers by Wickets"),
        },
        ChartTab::Venues => render_ranked_chart(
            frame,
            area,
            "Top Venues by Matches Hosted",
            "matches",
            &state.charts.venues,
            Color::Yellow,
            "No matches for this filter",
        ),
    }
}

fn render_hint(frame: &mut Frame, area: Rect, text: &str) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let hint = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, area);
}

fn render_missing_deliveries(frame: &mut Frame, area: Rect, title: &str) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_hint(
        frame,
        inner,
        "No delivery table loaded. Press 'd' to load a deliveries CSV.",
    );
}

fn render_season_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = &state.charts.seasons;
    let block = Block::default()
        .title("Matches per Season")
        .borders(Borders::ALL);
    if rows.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        render_hint(frame, inner, "No matches for this filter");
        return;
    }

    let max = rows.iter().map(|r| r.matches).max().unwrap_or(0);
    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            Bar::default()
                .label(Line::from(row.season.to_string()))
                .value(row.matches)
                .text_value(row.matches.to_string())
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .block(block)
        .bar_width(5)
        .bar_gap(1)
        .max(max.max(1));
    frame.render_widget(chart, area);
}

fn render_ranked_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    unit: &str,
    rows: &[RankedCount],
    color: Color,
    empty_text: &str,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    if rows.is_empty() {
        render_hint(frame, inner, empty_text);
        return;
    }

    let max = rows.iter().map(|r| r.value).max().unwrap_or(0);
    let name_width = rows
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .clamp(8, 34) as u16;

    for (i, row) in rows.iter().take(inner.height as usize).enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + i as u16,
            width: inner.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(name_width + 2), Constraint::Min(10)])
            .split(row_area);
        frame.render_widget(Paragraph::new(row.name.as_str()), cols[0]);
        let text = format!("{} {}", row.value, unit);
        frame.render_widget(value_bar(row.value, max, text, color), cols[1]);
    }
}

fn render_toss_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let toss = &state.charts.toss;
    let block = Block::default()
        .title("Toss Winner vs Match Result")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    if toss.decided() == 0 {
        render_hint(frame, inner, "No decided matches for this filter");
        return;
    }

    let rows = [
        ("Won toss, won match", toss.won_and_won, Color::Green),
        ("Won toss, lost match", toss.won_but_lost, Color::Red),
    ];
    let max = toss.won_and_won.max(toss.won_but_lost);
    let name_width = rows
        .iter()
        .map(|(label, _, _)| label.len())
        .max()
        .unwrap_or(0) as u16;

    for (i, (label, value, color)) in rows.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let row_area = Rect {
            x: inner.x,
            y: inner.y + i as u16,
            width: inner.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(name_width + 2), Constraint::Min(10)])
            .split(row_area);
        frame.render_widget(Paragraph::new(*label), cols[0]);
        frame.render_widget(
            value_bar(*value, max, format!("{value} matches"), *color),
            cols[1],
        );
    }

    if inner.height > 3 {
        let summary_area = Rect {
            x: inner.x,
            y: inner.y + 3,
            width: inner.width,
            height: 1,
        };
        let summary = Paragraph::new(format!("decided matches: {}", toss.decided()))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(summary, summary_area);
    }
}

fn value_bar(value: u64, max: u64, text: String, color: Color) -> BarChart<'static> {
    let bar = Bar::default()
        .value(value)
        .text_value(text)
        .style(Style::default().fg(color));
    BarChart::default()
        .data(BarGroup::default().bars(&[bar]))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(max.max(1))
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No log lines yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_prompt_popup(frame: &mut Frame, area: Rect, prompt: &PathPrompt) {
    let popup_area = centered_rect(70, 20, area);
    frame.render_widget(Clear, popup_area);

    let text = format!("> {}_", prompt.buffer);
    let body = Paragraph::new(text).block(
        Block::default()
            .title(prompt.kind.title())
            .borders(Borders::ALL),
    );
    frame.render_widget(body, popup_area);
}

fn render_notice_popup(frame: &mut Frame, area: Rect, notice: &str) {
    let popup_area = centered_rect(60, 20, area);
    frame.render_widget(Clear, popup_area);

    let body = Paragraph::new(notice)
        .alignment(Alignment::Center)
        .block(Block::default().title("Loaded").borders(Borders::ALL));
    frame.render_widget(body, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "IPL Terminal - Help",
        "",
        "Data:",
        "  m            Load matches CSV (path prompt)",
        "  d            Load deliveries CSV (path prompt)",
        "  g            Load built-in demo feed",
        "",
        "Filters:",
        "  s / S        Next / previous season",
        "  t / T        Next / previous team",
        "  a / Enter    Apply filters and redraw charts",
        "",
        "Charts:",
        "  1-6          Jump to chart",
        "  Tab / Right  Next chart",
        "  S-Tab / Left Previous chart",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
