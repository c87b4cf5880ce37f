use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
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
use signage_core::{DashboardSnapshot, Distribution, OverviewApi, RefreshConfig};

use crate::viewer::DashboardState;

/// One full-screen panel of the unattended rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Kpis,
    Age,
    Gender,
    Emotion,
    Performance,
    Attention,
}

impl Slide {
    pub const ORDER: [Slide; 6] = [
        Slide::Kpis,
        Slide::Age,
        Slide::Gender,
        Slide::Emotion,
        Slide::Performance,
        Slide::Attention,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Slide::Kpis => "Key Metrics",
            Slide::Age => "Age Distribution",
            Slide::Gender => "Gender Distribution",
            Slide::Emotion => "Emotion Distribution",
            Slide::Performance => "Ad Performance",
            Slide::Attention => "Ad Attention",
        }
    }

    pub fn next(self) -> Slide {
        let idx = Self::ORDER
            .iter()
            .position(|slide| *slide == self)
            .unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|slide| *slide == self)
            .unwrap_or(0)
            + 1
    }
}

pub async fn run_slideshow<C: OverviewApi>(client: &C, refresh: &RefreshConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = DashboardState::new();
    let mut slide = Slide::Kpis;
    let mut next_refresh = Instant::now();
    let mut next_advance = Instant::now() + refresh.slide_dwell;

    let run_result = async {
        loop {
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break
                        }
                        _ => {}
                    }
                }
            }

            if Instant::now() >= next_refresh {
                state.apply(client.fetch_overview().await);
                next_refresh = Instant::now() + refresh.refresh_interval;
            }

            if Instant::now() >= next_advance {
                slide = slide.next();
                next_advance = Instant::now() + refresh.slide_dwell;
            }

            terminal.draw(|frame| draw_ui(frame.size(), frame, &state, slide))?;
        }

        Ok::<(), anyhow::Error>(())
    }
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn draw_ui(area: Rect, frame: &mut ratatui::Frame<'_>, state: &DashboardState, slide: Slide) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    match &state.latest {
        Some(snapshot) => render_slide(frame, rows[0], snapshot, slide),
        None => {
            let waiting = Paragraph::new(Line::from("Waiting for first snapshot..."))
                .block(Block::default().borders(Borders::ALL).title(slide.title()));
            frame.render_widget(waiting, rows[0]);
        }
    }

    frame.render_widget(render_footer(state, slide), rows[1]);
}

fn render_slide(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    snapshot: &DashboardSnapshot,
    slide: Slide,
) {
    match slide {
        Slide::Kpis => render_kpi_slide(frame, area, snapshot),
        Slide::Age => render_distribution_slide(
            frame,
            area,
            slide.title(),
            &snapshot.age_distribution,
            Color::Yellow,
        ),
        Slide::Gender => render_distribution_slide(
            frame,
            area,
            slide.title(),
            &snapshot.gender_distribution,
            Color::Cyan,
        ),
        Slide::Emotion => render_distribution_slide(
            frame,
            area,
            slide.title(),
            &snapshot.emotion_distribution,
            Color::Green,
        ),
        Slide::Performance => render_performance_slide(frame, area, snapshot),
        Slide::Attention => render_attention_slide(frame, area, snapshot),
    }
}

fn render_kpi_slide(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &DashboardSnapshot) {
    let lines = vec![
        Line::from(""),
        kpi_line("Total Audience", snapshot.kpis.total_audience.to_string()),
        kpi_line("Total Views", snapshot.kpis.total_views.to_string()),
        kpi_line("Ads Tracked", snapshot.kpis.total_ads.to_string()),
        kpi_line(
            "Avg View Time",
            format!("{:.1} s", snapshot.kpis.avg_view_seconds),
        ),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Slide::Kpis.title()),
    );
    frame.render_widget(panel, area);
}

fn kpi_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {label:<16} ")),
        Span::styled(
            value,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_distribution_slide(
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
        .bar_width(13)
        .bar_gap(2)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));

    frame.render_widget(chart, area);
}

fn render_performance_slide(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    snapshot: &DashboardSnapshot,
) {
    let rows: Vec<Row> = snapshot
        .ads_performance
        .iter()
        .map(|ad| Row::new(vec![ad.ad_name.clone(), ad.total_viewers.to_string()]))
        .collect();

    let table = Table::new(rows, [Constraint::Min(24), Constraint::Length(8)])
        .header(
            Row::new(vec!["Ad", "Viewers"]).style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Slide::Performance.title()),
        );

    frame.render_widget(table, area);
}

fn render_attention_slide(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    snapshot: &DashboardSnapshot,
) {
    let rows: Vec<Row> = snapshot
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

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(5),
        ],
    )
    .header(
        Row::new(vec!["Ad", "Looked", "Ignored", "Rate"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Slide::Attention.title()),
    );

    frame.render_widget(table, area);
}

fn render_footer(state: &DashboardState, slide: Slide) -> Paragraph<'static> {
    let status = format!(
        "slide {}/{}  updated={}",
        slide.position(),
        Slide::ORDER.len(),
        state
            .last_updated
            .map(|ts| ts.format("%H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
    );

    let line = match &state.last_error {
        Some(message) => Line::from(vec![
            Span::raw(status),
            Span::styled(
                format!("  degraded: {message}"),
                Style::default().fg(Color::Red),
            ),
        ]),
        None => Line::from(status),
    };

    Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Slideshow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_walks_every_slide_and_wraps() {
        let mut slide = Slide::Kpis;
        let mut seen = Vec::new();
        for _ in 0..Slide::ORDER.len() {
            seen.push(slide);
            slide = slide.next();
        }

        assert_eq!(seen, Slide::ORDER);
        assert_eq!(slide, Slide::Kpis, "rotation wraps back to the start");
    }

    #[test]
    fn positions_are_one_based_and_sequential() {
        let positions: Vec<usize> = Slide::ORDER.iter().map(|slide| slide.position()).collect();
        assert_eq!(positions, [1, 2, 3, 4, 5, 6]);
    }
}
