use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use tracing::Level;

use crate::log_buffer::{LogBuffer, LogEntry};
use crate::state::LogsState;
use crate::ui::{
    components::{empty_state, help_bar},
    layouts, theme,
};

const TARGET_WIDTH: usize = 25;

pub fn render(f: &mut Frame, state: &LogsState, log_buffer: &LogBuffer) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = format!("Logs ({} entries)", state.total_entries);
    f.render_widget(
        Paragraph::new(title).style(theme::title_style()),
        title_area,
    );

    render_entries(f, content_area, state, log_buffer);
    render_help(f, help_area, state);
}

fn render_entries(f: &mut Frame, area: Rect, state: &LogsState, log_buffer: &LogBuffer) {
    let entries = log_buffer.entries();
    if entries.is_empty() {
        empty_state::render_empty_state(f, area, "Session Logs", "No logs yet", None);
        return;
    }

    // scroll_offset counts lines back from the newest entry, so the visible
    // window ends that many lines above the bottom
    let visible = area.height.saturating_sub(2) as usize;
    let end = entries.len().saturating_sub(state.scroll_offset);
    let start = end.saturating_sub(visible);

    let rows: Vec<Row> = entries[start..end].iter().map(entry_row).collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(TARGET_WIDTH as u16),
        Constraint::Min(30),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Time", "Level", "Target", "Message"])
                .style(theme::header_style())
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Logs [{}-{} of {}] ",
            start + 1,
            end,
            entries.len()
        )));

    f.render_widget(table, area);
}

fn entry_row(entry: &LogEntry) -> Row<'static> {
    Row::new(vec![
        entry.timestamp.format("%H:%M:%S%.3f").to_string(),
        level_tag(entry.level).to_string(),
        truncate_target(&entry.target),
        entry.message.clone(),
    ])
    .style(level_style(entry.level))
}

fn level_style(level: Level) -> Style {
    match level {
        Level::ERROR => Style::default()
            .fg(theme::COLOR_NEGATIVE)
            .add_modifier(Modifier::BOLD),
        Level::WARN => Style::default().fg(theme::COLOR_LOADING),
        Level::INFO => Style::default().fg(theme::COLOR_POSITIVE),
        Level::DEBUG => Style::default().fg(Color::Blue),
        Level::TRACE => Style::default().fg(theme::COLOR_ZERO),
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Keep the tail of an overlong module path; the crate prefix is the least
/// interesting part
fn truncate_target(target: &str) -> String {
    let chars = target.chars().count();
    if chars <= TARGET_WIDTH {
        return target.to_string();
    }
    let tail: String = target.chars().skip(chars - (TARGET_WIDTH - 3)).collect();
    format!("...{tail}")
}

fn render_help(f: &mut Frame, area: Rect, state: &LogsState) {
    let mut text =
        "j/k: scroll | G: newest | gg: oldest | PgUp/PgDn: page | h: back | ?: help".to_string();
    if state.scroll_offset > 0 {
        text.push_str(&format!(" (scrolled {} from bottom)", state.scroll_offset));
    }

    help_bar::render_help_bar(f, area, &text);
}
