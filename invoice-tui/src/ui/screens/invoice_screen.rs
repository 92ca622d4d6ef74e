use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::config::EditMode;
use crate::state::{HeaderField, InputMode, InvoiceState, ItemField, ItemRow};
use crate::ui::{
    components::{empty_state, help_bar, item_form, loading_indicator, status_line},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &InvoiceState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    render_title(f, title_area, state);

    // Staged entry gets a dedicated form panel above the table
    let show_form_panel =
        state.input_mode == InputMode::ItemForm && state.edit_mode == EditMode::Staged;

    let mut constraints = vec![Constraint::Length(theme::HEADER_PANEL_HEIGHT)];
    if show_form_panel {
        constraints.push(Constraint::Length(theme::ITEM_FORM_HEIGHT));
    }
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(theme::SUMMARY_CARD_HEIGHT));
    constraints.push(Constraint::Length(theme::STATUS_LINE_HEIGHT));

    let chunks = Layout::vertical(constraints).split(content_area);
    let mut next = 0;
    let header_area = chunks[next];
    next += 1;
    let form_area = if show_form_panel {
        let area = chunks[next];
        next += 1;
        Some(area)
    } else {
        None
    };
    let table_area = chunks[next];
    let summary_area = chunks[next + 1];
    let status_area = chunks[next + 2];

    render_header_panel(f, header_area, state);
    if let (Some(area), Some(form)) = (form_area, state.item_form.as_ref()) {
        item_form::render_item_form(f, area, form);
    }
    render_items_table(f, table_area, state);
    render_summary(f, summary_area, state);
    status_line::render_status_line(f, status_area, state.status.as_ref());

    render_help(f, help_area, state);
}

fn render_title(f: &mut Frame, area: Rect, state: &InvoiceState) {
    let (title_area, indicator_area) = layouts::title_with_loading(area);

    let paragraph = Paragraph::new("Invoice Entry").style(theme::title_style());
    f.render_widget(paragraph, title_area);

    loading_indicator::render_loading_indicator(f, indicator_area, &state.request);
}

fn render_header_panel(f: &mut Frame, area: Rect, state: &InvoiceState) {
    let editing = state.input_mode == InputMode::HeaderForm;

    let border_style = if editing {
        theme::accent_border_style()
    } else {
        Style::default()
    };
    let title = if editing {
        " Invoice Details (Tab: next field, Enter/Esc: done) "
    } else {
        " Invoice Details (press i to edit) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let top = Layout::horizontal([
        Constraint::Percentage(33),
        Constraint::Percentage(33),
        Constraint::Percentage(34),
    ])
    .spacing(theme::TABLE_COLUMN_SPACING)
    .split(rows[0]);

    render_header_field(f, top[0], state, HeaderField::InvoiceNumber, editing);
    render_header_field(f, top[1], state, HeaderField::InvoiceDate, editing);
    render_header_field(f, top[2], state, HeaderField::DueDate, editing);

    render_header_field(f, rows[1], state, HeaderField::CustomerName, editing);
    render_header_field(f, rows[2], state, HeaderField::CustomerAddress, editing);

    let bottom = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .spacing(theme::TABLE_COLUMN_SPACING)
        .split(rows[3]);

    render_header_field(f, bottom[0], state, HeaderField::CustomerPhone, editing);
    render_header_field(f, bottom[1], state, HeaderField::CustomerEmail, editing);
}

fn render_header_field(
    f: &mut Frame,
    area: Rect,
    state: &InvoiceState,
    field: HeaderField,
    editing: bool,
) {
    let header = &state.header;
    let value = match field {
        HeaderField::InvoiceNumber => &header.invoice_number,
        HeaderField::InvoiceDate => &header.invoice_date,
        HeaderField::DueDate => &header.due_date,
        HeaderField::CustomerName => &header.customer_name,
        HeaderField::CustomerAddress => &header.customer_address,
        HeaderField::CustomerPhone => &header.customer_phone,
        HeaderField::CustomerEmail => &header.customer_email,
    };

    let is_focused = editing && state.header_focus == field;
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

fn render_items_table(f: &mut Frame, area: Rect, state: &InvoiceState) {
    if state.items.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            " Items ",
            "No items on this invoice",
            Some("Press n to add an item"),
        );
        return;
    }

    // The row being edited inline shows its raw input buffers with the
    // focused field highlighted
    let inline_form = if state.edit_mode == EditMode::Inline {
        state.item_form.as_ref()
    } else {
        None
    };

    let rows: Vec<Row> = state
        .items
        .iter()
        .map(|item| {
            let editing_this_row =
                inline_form.and_then(|form| form.editing_row_id) == Some(item.id);
            match (editing_this_row, inline_form) {
                (true, Some(form)) => build_editing_row(item, form.current_field),
                _ => build_item_row(item),
            }
        })
        .collect();

    let widths = [
        Constraint::Min(20),    // Product
        Constraint::Length(10), // Qty
        Constraint::Length(12), // Unit Price
        Constraint::Length(12), // Total
    ];

    let table = Table::new(rows, widths)
        .column_spacing(theme::TABLE_COLUMN_SPACING)
        .header(
            Row::new(vec!["Product", "Qty", "Unit Price", "Total"])
                .style(theme::header_style())
                .bottom_margin(1),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Items ({}) ", state.items.len())),
        )
        .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn build_item_row(item: &ItemRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(item.name.clone()),
        Cell::from(Text::from(item.quantity.clone()).right_aligned()),
        Cell::from(Text::from(item.unit_price.clone()).right_aligned()),
        Cell::from(Text::from(item.total.to_string()).right_aligned()),
    ])
}

fn build_editing_row(item: &ItemRow, focused: ItemField) -> Row<'static> {
    let field_style = |field: ItemField| {
        if focused == field {
            theme::form_field_focused_style()
        } else {
            theme::form_field_style()
        }
    };
    let shown = |value: &str| {
        if value.is_empty() {
            "_________".to_string()
        } else {
            value.to_string()
        }
    };

    Row::new(vec![
        Cell::from(Span::styled(shown(&item.name), field_style(ItemField::Name))),
        Cell::from(
            Text::from(Span::styled(
                shown(&item.quantity),
                field_style(ItemField::Quantity),
            ))
            .right_aligned(),
        ),
        Cell::from(
            Text::from(Span::styled(
                shown(&item.unit_price),
                field_style(ItemField::UnitPrice),
            ))
            .right_aligned(),
        ),
        Cell::from(Text::from(item.total.to_string()).right_aligned()),
    ])
}

fn render_summary(f: &mut Frame, area: Rect, state: &InvoiceState) {
    let cards = Layout::horizontal([
        Constraint::Percentage(33),
        Constraint::Percentage(33),
        Constraint::Percentage(34),
    ])
    .split(area);

    render_summary_card(
        f,
        cards[0],
        " Subtotal ",
        state.summary.subtotal.to_string(),
        Style::default(),
    );

    // Tax card doubles as the tax-rate editor
    let editing_tax = state.input_mode == InputMode::TaxRate;
    let tax_title = if editing_tax {
        " Tax Rate % (Enter/Esc: done) ".to_string()
    } else {
        format!(" Tax ({}%) ", tax_rate_display(&state.tax_rate))
    };
    let tax_value = if editing_tax {
        if state.tax_rate.is_empty() {
            "_".to_string()
        } else {
            state.tax_rate.clone()
        }
    } else {
        state.summary.tax_amount.to_string()
    };
    let tax_border = if editing_tax {
        theme::accent_border_style()
    } else {
        Style::default()
    };
    render_summary_card(f, cards[1], &tax_title, tax_value, tax_border);

    render_summary_card(
        f,
        cards[2],
        " Grand Total ",
        state.summary.grand_total.to_string(),
        Style::default(),
    );
}

fn render_summary_card(f: &mut Frame, area: Rect, title: &str, value: String, border_style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let paragraph = Paragraph::new(Span::styled(value, theme::header_style()))
        .alignment(Alignment::Right);
    f.render_widget(paragraph, inner);
}

fn tax_rate_display(tax_rate: &str) -> &str {
    let trimmed = tax_rate.trim();
    if trimmed.is_empty() || trimmed.parse::<f64>().is_err() {
        "0"
    } else {
        trimmed
    }
}

fn render_help(f: &mut Frame, area: Rect, state: &InvoiceState) {
    let text = match state.input_mode {
        InputMode::ItemForm => {
            "Tab: next field | Enter: add | Ctrl+L: clear | Esc: close | ?: help"
        }
        InputMode::HeaderForm => "Tab: next field | Enter/Esc: done | Ctrl+L: clear | ?: help",
        InputMode::TaxRate => "Type a rate | Enter/Esc: done | ?: help",
        InputMode::Normal => {
            "j/k: select | n: new item | e: edit | d: remove | i: details | t: tax | s: save | p/P: export PDF | ?: help"
        }
    };

    help_bar::render_help_bar(f, area, text);
}
