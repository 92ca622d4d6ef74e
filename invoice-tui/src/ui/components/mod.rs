pub mod empty_state;
pub mod help_bar;
pub mod help_popup;
pub mod item_form;
pub mod loading_indicator;
pub mod popup;
pub mod status_line;
