use std::path::PathBuf;

use invoice_api::models::Cents;
use invoice_tui::config::{EditMode, Settings};
use invoice_tui::events::DataEvent;
use invoice_tui::input::Key;
use invoice_tui::state::{InputMode, RequestState, StatusKind};
use invoice_tui::testing::TestApp;
use invoice_tui::ui::screens::Screen;

/// Add an item through the staged form: open, type the three fields, submit
fn add_item(app: &mut TestApp, name: &str, quantity: &str, unit_price: &str) {
    app.send_key(Key::Char('n'));
    app.send_chars(name);
    app.send_key(Key::Tab);
    app.send_chars(quantity);
    app.send_key(Key::Tab);
    app.send_chars(unit_price);
    app.send_key(Key::Enter);
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();

    // Initially should not quit
    app.assert_not_quit();

    // Press 'q' to quit
    app.send_key(Key::Char('q'));

    // Assert app should quit
    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();

    // Initially help is hidden
    assert!(!app.state().help_visible);

    // Press '?' to show help
    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Press '?' again to hide
    app.send_key(Key::Char('?'));
    assert!(!app.state().help_visible);

    // Press '?' again to show
    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Press 'Esc' to hide
    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_multi_key_sequence_gl_navigates_to_logs() {
    let mut app = TestApp::new();

    assert_eq!(app.state().pending_key, None);

    // First 'g' sets pending key
    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));

    // 'l' navigates to the logs screen and clears pending
    app.send_key(Key::Char('l'));
    assert_eq!(app.state().pending_key, None);
    assert!(matches!(app.state().current_screen(), Screen::Logs(_)));

    // Esc returns to the invoice
    app.send_key(Key::Esc);
    assert!(matches!(app.state().current_screen(), Screen::Invoice(_)));
}

#[test]
fn test_pending_key_cleared_after_invalid_sequence() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));

    // Press a key that doesn't complete any sequence
    app.send_key(Key::Char('x'));
    assert_eq!(app.state().pending_key, None);
}

#[test]
fn test_staged_entry_recalculates_summary() {
    let mut app = TestApp::new();

    add_item(&mut app, "Pen", "2", "1.50");
    add_item(&mut app, "Book", "1", "9.99");

    let invoice = app.invoice();
    assert_eq!(invoice.items.len(), 2);
    assert_eq!(invoice.items[0].total, Cents::new(300));
    assert_eq!(invoice.items[1].total, Cents::new(999));

    // Default tax rate is 8%
    assert_eq!(invoice.summary.subtotal, Cents::new(1299));
    assert_eq!(invoice.summary.tax_amount, Cents::new(104));
    assert_eq!(invoice.summary.grand_total, Cents::new(1403));

    // The staged form stays open for the next item
    assert_eq!(invoice.input_mode, InputMode::ItemForm);
}

#[test]
fn test_removing_item_updates_totals() {
    let mut app = TestApp::new();

    add_item(&mut app, "Pen", "2", "1.50");
    add_item(&mut app, "Book", "1", "9.99");
    app.send_key(Key::Esc);

    // Selection sits on the last added row, move up to Pen and remove it
    app.send_key(Key::Char('k'));
    app.send_key(Key::Char('d'));

    let invoice = app.invoice();
    assert_eq!(invoice.items.len(), 1);
    assert_eq!(invoice.items[0].name, "Book");
    assert_eq!(invoice.summary.subtotal, Cents::new(999));
    assert_eq!(invoice.summary.grand_total, Cents::new(1079));
}

#[test]
fn test_empty_name_is_rejected() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('n'));
    app.send_key(Key::Tab);
    app.send_chars("2");
    app.send_key(Key::Tab);
    app.send_chars("5");
    app.send_key(Key::Enter);

    let invoice = app.invoice();
    assert!(invoice.items.is_empty());
    let form = invoice.item_form.as_ref().unwrap();
    assert!(form.validation_error.is_some());
}

#[test]
fn test_math_expression_in_quantity() {
    let mut app = TestApp::new();

    add_item(&mut app, "Widget", "2*3", "1.00");

    let invoice = app.invoice();
    assert_eq!(invoice.items[0].total, Cents::new(600));
    assert_eq!(invoice.summary.subtotal, Cents::new(600));
}

#[test]
fn test_edit_selected_item() {
    let mut app = TestApp::new();

    add_item(&mut app, "Pen", "2", "1.50");
    app.send_key(Key::Esc);

    // Edit the selected row, bump quantity from 2 to 3
    app.send_key(Key::Char('e'));
    app.send_key(Key::Tab);
    app.send_key(Key::Backspace);
    app.send_chars("3");
    app.send_key(Key::Enter);

    let invoice = app.invoice();
    assert_eq!(invoice.items.len(), 1);
    assert_eq!(invoice.items[0].quantity, "3");
    assert_eq!(invoice.items[0].total, Cents::new(450));
    assert_eq!(invoice.summary.subtotal, Cents::new(450));
}

#[test]
fn test_inline_entry_updates_total_per_keystroke() {
    let settings = Settings {
        edit_mode: EditMode::Inline,
        ..Default::default()
    };
    let mut app = TestApp::with_settings(&settings);

    // 'n' appends an editable row immediately with quantity 1 and price 0
    app.send_key(Key::Char('n'));
    assert_eq!(app.invoice().items.len(), 1);

    app.send_chars("Pen");
    assert_eq!(app.invoice().items[0].name, "Pen");

    // Replace the default quantity with 2
    app.send_key(Key::Tab);
    app.send_key(Key::Backspace);
    app.send_chars("2");

    // Replace the default price with 1.50, checking mid-typing totals
    app.send_key(Key::Tab);
    app.send_key(Key::Backspace);
    app.send_chars("1.5");
    assert_eq!(app.invoice().items[0].total, Cents::new(300));
    assert_eq!(app.invoice().summary.subtotal, Cents::new(300));

    app.send_key(Key::Enter);
    let invoice = app.invoice();
    assert_eq!(invoice.input_mode, InputMode::Normal);
    assert_eq!(invoice.items.len(), 1);
}

#[test]
fn test_inline_empty_row_dropped_on_escape() {
    let settings = Settings {
        edit_mode: EditMode::Inline,
        ..Default::default()
    };
    let mut app = TestApp::with_settings(&settings);

    app.send_key(Key::Char('n'));
    assert_eq!(app.invoice().items.len(), 1);

    // Closing without naming the product discards the row
    app.send_key(Key::Esc);
    assert!(app.invoice().items.is_empty());
}

#[test]
fn test_tax_rate_edit() {
    let mut app = TestApp::new();

    add_item(&mut app, "Book", "1", "9.99");
    app.send_key(Key::Esc);

    app.send_key(Key::Char('t'));
    assert_eq!(app.invoice().input_mode, InputMode::TaxRate);

    // Clear the default 8 and type 10
    app.send_key(Key::Backspace);
    app.send_chars("10");
    app.send_key(Key::Enter);

    let invoice = app.invoice();
    assert_eq!(invoice.input_mode, InputMode::Normal);
    assert_eq!(invoice.summary.tax_amount, Cents::new(100));
    assert_eq!(invoice.summary.grand_total, Cents::new(1099));
}

#[test]
fn test_unparseable_tax_rate_treated_as_zero() {
    let mut app = TestApp::new();

    add_item(&mut app, "Book", "1", "9.99");
    app.send_key(Key::Esc);

    app.send_key(Key::Char('t'));
    app.send_key(Key::Backspace);
    app.send_key(Key::Enter);

    let invoice = app.invoice();
    assert_eq!(invoice.summary.tax_amount, Cents::new(0));
    assert_eq!(invoice.summary.grand_total, Cents::new(999));
}

#[test]
fn test_header_form_editing() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('i'));
    assert_eq!(app.invoice().input_mode, InputMode::HeaderForm);

    app.send_chars("INV-42");
    app.send_key(Key::Tab);
    app.send_chars("2026-08-23");
    app.send_key(Key::Esc);

    let invoice = app.invoice();
    assert_eq!(invoice.input_mode, InputMode::Normal);
    assert_eq!(invoice.header.invoice_number, "INV-42");
    assert_eq!(invoice.header.invoice_date, "2026-08-23");
}

#[test]
fn test_save_success_resets_form() {
    let mut app = TestApp::new();

    add_item(&mut app, "Pen", "2", "1.50");
    app.send_key(Key::Esc);

    app.send_key(Key::Char('s'));
    assert!(matches!(
        app.invoice().request,
        RequestState::InFlight(_)
    ));

    app.send_data_event(DataEvent::InvoiceSaved {
        message: "Invoice 7 saved".to_string(),
    });

    let invoice = app.invoice();
    assert!(matches!(invoice.request, RequestState::Done));
    let status = invoice.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Info);
    assert!(status.text.contains("Invoice 7 saved"));

    // reset_on_save defaults to true
    assert!(invoice.items.is_empty());
    assert_eq!(invoice.summary.grand_total, Cents::new(0));
}

#[test]
fn test_save_failure_preserves_entered_data() {
    let mut app = TestApp::new();

    add_item(&mut app, "Pen", "2", "1.50");
    app.send_key(Key::Esc);
    app.send_key(Key::Char('s'));

    app.send_data_event(DataEvent::InvoiceSaveFailed {
        error: "db down".to_string(),
    });

    let invoice = app.invoice();
    assert!(matches!(invoice.request, RequestState::Error(_)));
    let status = invoice.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("db down"));

    // Entered rows survive a failed save
    assert_eq!(invoice.items.len(), 1);
    assert_eq!(invoice.summary.subtotal, Cents::new(300));

    // Esc dismisses the status message
    app.send_key(Key::Esc);
    assert!(app.invoice().status.is_none());
}

#[test]
fn test_second_submit_refused_while_in_flight() {
    let mut app = TestApp::new();

    add_item(&mut app, "Pen", "2", "1.50");
    app.send_key(Key::Esc);

    app.send_key(Key::Char('s'));
    app.send_key(Key::Char('s'));

    let invoice = app.invoice();
    assert!(matches!(invoice.request, RequestState::InFlight(_)));
    let status = invoice.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("already in progress"));
}

#[test]
fn test_export_by_number_requires_invoice_number() {
    let mut app = TestApp::new();

    // No invoice number entered yet
    app.send_key(Key::Char('P'));

    let invoice = app.invoice();
    assert!(matches!(invoice.request, RequestState::Idle));
    let status = invoice.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
}

#[test]
fn test_export_by_number_with_number_set() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('i'));
    app.send_chars("42");
    app.send_key(Key::Esc);

    app.send_key(Key::Char('P'));
    assert!(matches!(
        app.invoice().request,
        RequestState::InFlight(_)
    ));

    app.send_data_event(DataEvent::PdfExported {
        path: PathBuf::from("/tmp/invoice_42.pdf"),
    });

    let invoice = app.invoice();
    assert!(matches!(invoice.request, RequestState::Done));
    let status = invoice.status.as_ref().unwrap();
    assert!(status.text.contains("invoice_42.pdf"));
}

#[test]
fn test_request_outcome_applies_while_on_logs_screen() {
    let mut app = TestApp::new();

    add_item(&mut app, "Pen", "2", "1.50");
    app.send_key(Key::Esc);
    app.send_key(Key::Char('s'));

    // Navigate away before the response arrives
    app.send_key(Key::Char('g'));
    app.send_key(Key::Char('l'));
    assert!(matches!(app.state().current_screen(), Screen::Logs(_)));

    app.send_data_event(DataEvent::PdfExportFailed {
        error: "connection refused".to_string(),
    });

    // The invoice below the logs screen still records the outcome
    let invoice = app.invoice();
    assert!(matches!(invoice.request, RequestState::Error(_)));
}
