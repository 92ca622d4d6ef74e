//! Non-blocking status line for request outcomes.

use ratatui::prelude::Rect;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::state::{StatusKind, StatusLine};
use crate::ui::theme;

/// Render the status line below the summary. Nothing is drawn when there is
/// no status to show.
pub fn render_status_line(f: &mut Frame, area: Rect, status: Option<&StatusLine>) {
    let Some(status) = status else {
        return;
    };

    let style = match status.kind {
        StatusKind::Info => Style::default().fg(theme::COLOR_POSITIVE),
        StatusKind::Error => Style::default()
            .fg(theme::COLOR_NEGATIVE)
            .add_modifier(Modifier::BOLD),
    };

    let text = format!("{} (Esc to dismiss)", status.text);
    f.render_widget(Paragraph::new(Span::styled(text, style)), area);
}
