//! Client-side state that lives outside any single component.

pub mod message_form;
pub mod modal_workflow;
pub mod toast_queue;

pub use message_form::{FormAction, MessageForm};
pub use modal_workflow::{
    DialogSurface, MessageSender, MessagingController, NotificationSink, PointerTarget, SendAck, SendError,
    SubmitError,
};
pub use toast_queue::{Toast, ToastAction, ToastQueue};
