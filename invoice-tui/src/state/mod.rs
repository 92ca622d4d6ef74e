pub mod reducer;
pub mod summary;
pub mod validators;

use crate::config::{EditMode, Settings};
use crate::state::summary::{recalculate_summary, Summary};
use crate::ui::screens::Screen;
use invoice_api::models::{Cents, InvoiceHeader};
use ratatui::widgets::TableState;
use std::cell::RefCell;
use throbber_widgets_tui::ThrobberState;

/// Lifecycle of the single in-flight server request.
///
/// Only one request may be active at a time; new submissions are refused
/// while a request is `InFlight`.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight(ThrobberState),
    Done,
    Error(String),
}

/// Input mode for the invoice screen
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    ItemForm,
    HeaderForm,
    TaxRate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Non-blocking status line shown below the summary card. Replaced by the
/// next outcome, cleared with Esc.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Form field for line-item entry
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum ItemField {
    #[default]
    Name,
    Quantity,
    UnitPrice,
}

impl ItemField {
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Quantity,
            Self::Quantity => Self::UnitPrice,
            Self::UnitPrice => Self::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Name => Self::UnitPrice,
            Self::Quantity => Self::Name,
            Self::UnitPrice => Self::Quantity,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Product",
            Self::Quantity => "Quantity",
            Self::UnitPrice => "Unit Price",
        }
    }
}

/// Form field for the invoice header panel
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum HeaderField {
    #[default]
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    CustomerName,
    CustomerAddress,
    CustomerPhone,
    CustomerEmail,
}

impl HeaderField {
    pub fn next(&self) -> Self {
        match self {
            Self::InvoiceNumber => Self::InvoiceDate,
            Self::InvoiceDate => Self::DueDate,
            Self::DueDate => Self::CustomerName,
            Self::CustomerName => Self::CustomerAddress,
            Self::CustomerAddress => Self::CustomerPhone,
            Self::CustomerPhone => Self::CustomerEmail,
            Self::CustomerEmail => Self::InvoiceNumber,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::InvoiceNumber => Self::CustomerEmail,
            Self::InvoiceDate => Self::InvoiceNumber,
            Self::DueDate => Self::InvoiceDate,
            Self::CustomerName => Self::DueDate,
            Self::CustomerAddress => Self::CustomerName,
            Self::CustomerPhone => Self::CustomerAddress,
            Self::CustomerEmail => Self::CustomerPhone,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::InvoiceNumber => "Invoice #",
            Self::InvoiceDate => "Invoice Date",
            Self::DueDate => "Due Date",
            Self::CustomerName => "Customer",
            Self::CustomerAddress => "Address",
            Self::CustomerPhone => "Phone",
            Self::CustomerEmail => "Email",
        }
    }
}

/// One row in the line-item table. Quantity and unit price are kept as the
/// raw input buffers so inline editing round-trips exactly; `total` is the
/// last computed row total.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: u64,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: Cents,
}

/// State for the staged line-item entry form
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ItemFormState {
    pub current_field: ItemField,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub validation_error: Option<String>,
    pub editing_row_id: Option<u64>,
}

impl ItemFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_row(row: &ItemRow) -> Self {
        Self {
            current_field: ItemField::Name,
            name: row.name.clone(),
            quantity: row.quantity.clone(),
            unit_price: row.unit_price.clone(),
            validation_error: None,
            editing_row_id: Some(row.id),
        }
    }

    /// The input buffer for the focused field
    pub fn active_buffer_mut(&mut self) -> &mut String {
        match self.current_field {
            ItemField::Name => &mut self.name,
            ItemField::Quantity => &mut self.quantity,
            ItemField::UnitPrice => &mut self.unit_price,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceState {
    pub header: InvoiceHeader,
    pub items: Vec<ItemRow>,
    pub next_row_id: u64,
    pub tax_rate: String,
    pub summary: Summary,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub item_form: Option<ItemFormState>,
    pub header_focus: HeaderField,
    pub status: Option<StatusLine>,
    pub request: RequestState,

    // Behavior settings captured at startup
    pub edit_mode: EditMode,
    pub reset_on_save: bool,
    pub default_tax_rate: String,
}

impl InvoiceState {
    pub fn new(settings: &Settings) -> Self {
        let tax_rate = settings.tax_rate_input();
        let mut state = Self {
            header: InvoiceHeader::default(),
            items: Vec::new(),
            next_row_id: 1,
            tax_rate: tax_rate.clone(),
            summary: Summary::default(),
            table_state: RefCell::default(),
            input_mode: InputMode::default(),
            item_form: None,
            header_focus: HeaderField::default(),
            status: None,
            request: RequestState::default(),
            edit_mode: settings.edit_mode,
            reset_on_save: settings.reset_on_save,
            default_tax_rate: tax_rate,
        };
        state.recalculate();
        state
    }

    /// Allocate an id for a new row
    pub fn allocate_row_id(&mut self) -> u64 {
        let id = self.next_row_id;
        self.next_row_id += 1;
        id
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state
            .borrow()
            .selected()
            .filter(|&i| i < self.items.len())
    }

    pub fn select_index(&self, index: usize) {
        self.table_state.borrow_mut().select(Some(index));
    }

    /// Recompute a single row total from its input buffers, then the summary.
    /// The row total is always updated before the summary so the two never
    /// disagree.
    pub fn recalculate_row(&mut self, id: u64) {
        if let Some(row) = self.items.iter_mut().find(|row| row.id == id) {
            row.total = summary::line_total(&row.quantity, &row.unit_price);
        }
        self.recalculate();
    }

    pub fn recalculate(&mut self) {
        self.summary = recalculate_summary(&self.items, &self.tax_rate);
    }

    /// Clear the whole invoice back to its startup state. Runs after a
    /// successful save when reset_on_save is enabled.
    pub fn reset_form(&mut self) {
        self.header = InvoiceHeader::default();
        self.items.clear();
        self.tax_rate = self.default_tax_rate.clone();
        self.item_form = None;
        self.input_mode = InputMode::Normal;
        self.header_focus = HeaderField::default();
        self.table_state.borrow_mut().select(None);
        self.recalculate();
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            history: vec![Screen::Invoice(InvoiceState::new(settings))],
            help_visible: false,
            pending_key: None,
            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    /// The invoice screen's state, wherever it sits in the navigation stack.
    /// Request outcomes must land even while the logs screen is on top.
    pub fn invoice_state_mut(&mut self) -> Option<&mut InvoiceState> {
        self.history.iter_mut().rev().find_map(|screen| match screen {
            Screen::Invoice(state) => Some(state),
            _ => None,
        })
    }

    pub fn invoice_state(&self) -> Option<&InvoiceState> {
        self.history.iter().rev().find_map(|screen| match screen {
            Screen::Invoice(state) => Some(state),
            _ => None,
        })
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        if let Some(state) = self.invoice_state_mut() {
            if let RequestState::InFlight(ref mut throbber_state) = state.request {
                return Some(throbber_state);
            }
        }
        None
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select_last();
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }
}

impl Scrollable for InvoiceState {
    fn num_items(&self) -> usize {
        self.items.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}
