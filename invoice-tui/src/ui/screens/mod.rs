pub mod invoice_screen;
pub mod logs_screen;

use crate::state::{InvoiceState, LogsState};

#[derive(Debug, Clone)]
pub enum Screen {
    Invoice(InvoiceState),
    Logs(LogsState),
}
