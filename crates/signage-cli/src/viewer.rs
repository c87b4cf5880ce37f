use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Paragraph, Row, Table};
use ratatui::Terminal;
use signage_core::{DashboardSnapshot, Distribution, OverviewApi, OverviewError, RefreshConfig};

/// What the dashboard currently knows. A failed refresh keeps the previous
/// snapshot on screen next to the error banner; the surface decides when to
/// try again, the client never does.
pub struct DashboardState {
    pub latest: Option<DashboardSnapshot>,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub refreshes_ok: u64,
    pub refreshes_err: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            latest: None,
            last_error: None,
            last_updated: None,
            refreshes_ok: 0,
            refreshes_err: 0,
        }
    }

    pub fn apply(&mut self, outcome: Result<DashboardSnapshot, OverviewError>) {
        match outcome {
            Ok(snapshot) => {
                self.latest = Some(snapshot);
                self.last_error = None;
                self.last_updated = Some(Utc::now());
                self.refreshes_ok += 1;
            }
            Err(err) => {
                self.last_error = Some(err.message);
                self.refreshes_err += 1;
            }
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn run_viewer<C: OverviewApi>(client: &C, refresh: &RefreshConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = DashboardState::new();
    let mut next_refresh = Instant::now();

    let run_result = async {
        loop {
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break
                        }
                        KeyCode::Char('r') => next_refresh = Instant::now(),
                        _ => {}
                    }
                }
            }

            if Instant::now() >= next_refresh {
                state.apply(client.fetch_overview().await);
                next_refresh = Instant::now() + refresh.refresh_interval;
            }

            terminal.draw(|frame| draw_ui(frame.size(), frame, &state))?;
        }

        Ok::<(), anyhow::Error>(())
    }
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn draw_ui(area: Rect, frame: &mut ratatui::Frame<'_>, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(render_header(state), rows[0]);

    match &state.latest {
        Some(snapshot) => {
            render_kpis(frame, rows[1], snapshot);
            render_distributions(frame, rows[2], snapshot);
            render_ad_tables(frame, rows[3], snapshot);
        }
        None => {
            let waiting = Paragraph::new(Line::from("Waiting for first snapshot..."))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(waiting, rows[2]);
        }
    }
}

fn render_header(state: &DashboardState) -> Paragraph<'static> {
    let status = format!(
        "refreshes ok={} err={} updated={}",
        state.refreshes_ok,
        state.refreshes_err,
        state
            .last_updated
            .map(|ts| ts.format("%H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
    );

    let mut lines = vec![Line::from(vec![
        Span::styled(
            "Signage Dashboard  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(status),
    ])];

    match &state.last_error {
        Some(message) => lines.push(Line::from(Span::styled(
            format!("degraded: {message}"),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("press 'q' to quit, 'r' to refresh")),
    }

    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Status"))
}

fn render_kpis(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &DashboardSnapshot) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let tiles = [
        ("Audience", snapshot.kpis.total_audience.to_string()),
        ("Views", snapshot.kpis.total_views.to_string()),
        ("Ads", snapshot.kpis.total_ads.to_string()),
        (
            "Avg View Time",
            format!("{:.1} s", snapshot.kpis.avg_view_seconds),
        ),
    ];

    for (idx, (title, value)) in tiles.into_iter().enumerate() {
        let tile = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(tile, cols[idx]);
    }
}

fn render_distributions(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &DashboardSnapshot) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_distribution_chart(frame, cols[0], "Age", &snapshot.age_distribution, Color::Yellow);
    render_distribution_chart(
        frame,
        cols[1],
        "Gender",
        &snapshot.gender_distribution,
        Color::Cyan,
    );
    render_distribution_chart(
        frame,
        cols[2],
        "Emotions",
        &snapshot.emotion_distribution,
        Color::Green,
    );
}

fn render_distribution_chart(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    distribution: &Distribution,
    color: Color,
) {
    let bars: Vec<(&str, u64)> = distribution
        .iter()
        .map(|(label, count)| (label.as_str(), *count))
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .data(&bars)
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));

    frame.render_widget(chart, area);
}

fn render_ad_tables(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &DashboardSnapshot) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let performance_rows: Vec<Row> = snapshot
        .ads_performance
        .iter()
        .map(|ad| Row::new(vec![ad.ad_name.clone(), ad.total_viewers.to_string()]))
        .collect();

    let performance = Table::new(
        performance_rows,
        [Constraint::Min(20), Constraint::Length(8)],
    )
    .header(Row::new(vec!["Ad", "Viewers"]).style(Style::default().add_modifier(Modifier::BOLD)))
    .block(Block::default().borders(Borders::ALL).title("Ad Performance"));

    frame.render_widget(performance, cols[0]);

    let attention_rows: Vec<Row> = snapshot
        .ads_attention
        .iter()
        .map(|ad| {
            Row::new(vec![
                ad.ad_name.clone(),
                ad.look_yes.to_string(),
                ad.look_no.to_string(),
                format!("{:.0}%", ad.attention_rate() * 100.0),
            ])
        })
        .collect();

    let attention = Table::new(
        attention_rows,
        [
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(5),
        ],
    )
    .header(
        Row::new(vec!["Ad", "Looked", "Ignored", "Rate"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Ad Attention"));

    frame.render_widget(attention, cols[1]);
}
