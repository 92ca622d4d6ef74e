//! Staged line-item entry form rendered above the items table.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::{ItemField, ItemFormState};
use crate::ui::theme;

/// Render the item entry form: three labeled input fields on one line and a
/// validation error line below them.
pub fn render_item_form(f: &mut Frame, area: Rect, form: &ItemFormState) {
    let title = if form.editing_row_id.is_some() {
        " Edit Item (Enter: save, Esc: cancel) "
    } else {
        " New Item (Enter: add, Esc: close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent_border_style())
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    let columns = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ])
    .spacing(theme::TABLE_COLUMN_SPACING)
    .split(rows[0]);

    render_field(f, columns[0], form, ItemField::Name, &form.name);
    render_field(f, columns[1], form, ItemField::Quantity, &form.quantity);
    render_field(f, columns[2], form, ItemField::UnitPrice, &form.unit_price);

    render_validation_error(f, rows[1], form);
}

fn render_field(f: &mut Frame, area: Rect, form: &ItemFormState, field: ItemField, value: &str) {
    let is_focused = form.current_field == field;
    let value_style = if is_focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };

    let shown = if value.is_empty() { "_________" } else { value };

    let line = Line::from(vec![
        Span::styled(format!("{}: ", field.label()), theme::help_text_style()),
        Span::styled(shown.to_string(), value_style),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

/// Render the validation error message below the input fields
pub fn render_validation_error(f: &mut Frame, area: Rect, form: &ItemFormState) {
    if let Some(ref error) = form.validation_error {
        let error_text = format!(" Error: {}", error);
        let paragraph = Paragraph::new(
            Span::from(error_text).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .style(Style::default().bg(theme::COLOR_NEGATIVE).fg(Color::White));
        f.render_widget(paragraph, area);
    }
}
