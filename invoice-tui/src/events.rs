use std::path::PathBuf;

/// Commands to execute (user actions → state changes and network requests)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Row selection
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,

    // Line-item entry
    EnterItemForm,
    EditSelectedItem,
    ExitItemForm,
    SubmitItemForm,
    RemoveSelectedItem,

    // Shared form editing (routed by the active input mode)
    NavigateFormField { forward: bool },
    AppendFormFieldChar { c: char },
    DeleteFormFieldChar,
    ClearFormField,

    // Invoice header
    EnterHeaderForm,
    ExitHeaderForm,

    // Tax rate
    EnterTaxRateEdit,
    ExitTaxRateEdit,

    // Network requests
    SaveInvoice,
    ExportPdfDirect,
    ExportPdfByNumber,

    // Status line
    ClearStatus,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    ToggleHelp,

    // System
    Quit,
}

/// Events from background request tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    InvoiceSaved { message: String },
    InvoiceSaveFailed { error: String },
    PdfExported { path: PathBuf },
    PdfExportFailed { error: String },
}
