pub mod chart_presenter;
pub mod header;
pub mod messaging_modal;
pub mod toast_stack;
