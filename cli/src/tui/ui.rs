use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, BorderType, Gauge, Padding, Paragraph},
};
use dtr_core::{Severity, WeeklyHistory};

use crate::report::truncate;
use crate::tui::app::DashboardApp;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    hours: Color,
    absent: Color,
    done: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    hours: Color::Green,
    absent: Color::Red,
    done: Color::Yellow,
};

// Bar heights are stored in tenths of an hour
const BAR_SCALE: f64 = 10.0;

pub fn draw(frame: &mut Frame, app: &DashboardApp) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),                        // Header
            Constraint::Length(app.alerts.len() as u16), // Alert banners
            Constraint::Length(3),                        // Progress
            Constraint::Length(5),                        // Stat cards
            Constraint::Min(8),                           // Week chart + day list
            Constraint::Length(1),                        // Footer
        ])
        .split(size);

    draw_header(frame, app, main_layout[0]);
    draw_alerts(frame, app, main_layout[1]);
    draw_progress(frame, app, main_layout[2]);
    draw_cards(frame, app, main_layout[3]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Chart
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(40), // Day list
        ])
        .split(main_layout[4]);

    match app.current_week() {
        Some(week) => {
            draw_chart(frame, week, content_chunks[0]);
            draw_day_list(frame, week, content_chunks[2]);
        }
        None => frame.render_widget(
            Paragraph::new("No log entries yet. Add one with `dtr log 8h`.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(THEME.muted)),
            main_layout[4],
        ),
    }

    let help = Line::from(vec![
        Span::styled("WEEK: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center);
    frame.render_widget(footer, main_layout[5]);
}

fn draw_header(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // "DTR"
            Constraint::Min(1),     // Job name
            Constraint::Length(30), // Week selector
        ])
        .split(area);

    let title = Paragraph::new(Span::styled("DAILY TIME RECORD", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)))
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(title, header_layout[0]);

    let job_line = format!(
        "{}  ·  {}",
        app.job.name.as_deref().unwrap_or("Unnamed job"),
        app.today.format("%a %Y-%m-%d")
    );
    let job = Paragraph::new(Span::styled(job_line, Style::default().fg(THEME.text)))
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(job, header_layout[1]);

    if let Some(week) = app.current_week() {
        let nav_text = Line::from(vec![
            Span::styled(" < ", Style::default().fg(if app.has_older() { THEME.text } else { THEME.muted })),
            Span::styled(format!(" Week {} - {} ", week.week, week.year), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
            Span::styled(" > ", Style::default().fg(if app.has_newer() { THEME.text } else { THEME.muted })),
        ]);
        let nav = Paragraph::new(nav_text)
            .alignment(Alignment::Right)
            .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
        frame.render_widget(nav, header_layout[2]);
    }

    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.muted));
    frame.render_widget(header_block, area);
}

fn draw_alerts(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let lines: Vec<Line> = app.alerts.iter().map(|alert| {
        let color = match alert.severity() {
            Severity::Info => THEME.primary,
            Severity::Success => THEME.done,
            Severity::Warning => THEME.absent,
        };
        Line::from(Span::styled(format!(" ● {}", alert.message()), Style::default().fg(color)))
    }).collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_progress(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let stats = &app.stats;
    let label = format!(
        "{:.1}% · {:.1} of {:.1}h",
        stats.percent_complete, stats.total_hours_logged, stats.target_hours
    );
    let color = if stats.is_completed {
        THEME.done
    } else if stats.is_near_completion {
        THEME.primary
    } else {
        THEME.hours
    };

    let gauge = Gauge::default()
        .block(Block::default().title(" Progress ").borders(Borders::ALL).border_type(BorderType::Rounded).border_style(Style::default().fg(THEME.muted)))
        .gauge_style(Style::default().fg(color))
        .ratio(stats.ratio().clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

fn draw_cards(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let stats = &app.stats;
    let cards = [
        ("Logged", format!("{:.1}h", stats.total_hours_logged), THEME.hours),
        ("Remaining", format!("{:.1}h", stats.remaining_hours), THEME.text),
        ("Days", format!("{} / {}", stats.days_logged, stats.days_since_start), THEME.primary),
        ("Absent", format!("{} ({} marked)", stats.absent_days, stats.absence_entries), THEME.absent),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value, color), chunk) in cards.into_iter().zip(chunks.iter()) {
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted))
                .title(format!(" {} ", title)),
        );
        frame.render_widget(card, *chunk);
    }
}

fn draw_chart(frame: &mut Frame, week: &WeeklyHistory, area: Rect) {
    // Oldest day on the left
    let bar_items: Vec<Bar> = week.days.iter().rev().map(|day| {
        let value = (day.stats.total_hours * BAR_SCALE).round() as u64;
        let color = if day.stats.absence_entries == day.stats.entries { THEME.absent } else { THEME.hours };
        Bar::default()
            .label(day.day_of_week.as_str())
            .value(value)
            .style(Style::default().fg(color))
            .text_value(if value > 0 { format!("{:.1}", day.stats.total_hours) } else { "0".to_string() })
    }).collect();

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(format!(" Hours this week ({:.1}h) ", week.stats.total_hours));

    let chart = BarChart::default()
        .block(chart_block)
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bar_items))
        .max((12.0 * BAR_SCALE) as u64);

    frame.render_widget(chart, area);
}

fn draw_day_list(frame: &mut Frame, week: &WeeklyHistory, area: Rect) {
    let note_width = area.width.saturating_sub(24) as usize;
    let mut lines = Vec::new();

    for day in &week.days {
        lines.push(Line::from(vec![
            Span::styled(format!("{} {}", day.day_of_week, day.date), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {:.1}h", day.stats.total_hours), Style::default().fg(THEME.hours)),
        ]));
        for entry in &day.entries {
            let (hours, color) = if entry.is_absence_marker() {
                ("absent".to_string(), THEME.absent)
            } else {
                (format!("{:.1}h", entry.hours), THEME.muted)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", entry.short_id()), Style::default().fg(THEME.muted)),
                Span::styled(format!("{:>6} ", hours), Style::default().fg(color)),
                Span::raw(truncate(entry.note.as_deref().unwrap_or(""), note_width)),
            ]));
        }
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Entries "),
    );
    frame.render_widget(list, area);
}
