pub mod use_messaging_modal;
