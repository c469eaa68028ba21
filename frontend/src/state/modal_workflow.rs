//! # Modal Workflow
//!
//! The "message a teacher" dialog as a small state machine.
//!
//! ```text
//! Closed --open()--> Open
//! Open --close() | overlay click | Escape | successful submit()--> Closed
//! ```
//!
//! The controller is the single owner of visibility and the background scroll
//! lock: both change together through [`DialogSurface::set_open`]. Everything
//! the workflow touches outside itself goes through a trait so the component
//! can plug in Yew state handles and tests can plug in recorders.
//!
//! The "Sending..." overlay is not a [`ModalState`]; it is tracked separately
//! by [`MessagingController::is_submitting`]. Each `open()` starts a new dialog
//! session, and a send only drives the surface of the session that started it.

use std::cell::Cell;

use async_trait::async_trait;
use shared::{MessageDraft, Severity};
use thiserror::Error;

pub const SEND_SUCCESS_MESSAGE: &str = "Message sent successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Where a pointer press landed: the dimmed overlay itself or the dialog box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Overlay,
    Content,
}

/// Confirmation from a sender that the message was accepted
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SendAck {
    pub message_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Please fill in all required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unknown recipient: {0}")]
    InvalidRecipient(String),

    #[error("The request timed out")]
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("The message dialog is not open")]
    DialogClosed,

    #[error("A message is already being sent")]
    AlreadySubmitting,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Send(#[from] SendError),
}

/// Delivers a validated draft somewhere
#[async_trait(?Send)]
pub trait MessageSender {
    async fn send(&self, draft: &MessageDraft) -> Result<SendAck, SendError>;
}

/// Receives transient user feedback
pub trait NotificationSink {
    fn notify(&self, message: &str, severity: Severity);
}

/// The visual side of the dialog
pub trait DialogSurface {
    /// Show the dialog and lock page scroll, or hide it and unlock.
    fn set_open(&self, open: bool);

    /// Put every form field back to its default value.
    fn reset_form(&self);

    /// Toggle the pending look of the submit trigger.
    fn set_busy(&self, busy: bool);
}

pub struct MessagingController<S, N, D> {
    sender: S,
    notifier: N,
    surface: D,
    state: Cell<ModalState>,
    session: Cell<u64>,
    /// Session whose send is still in flight
    pending: Cell<Option<u64>>,
}

impl<S, N, D> MessagingController<S, N, D>
where
    S: MessageSender,
    N: NotificationSink,
    D: DialogSurface,
{
    pub fn new(sender: S, notifier: N, surface: D) -> Self {
        Self {
            sender,
            notifier,
            surface,
            state: Cell::new(ModalState::Closed),
            session: Cell::new(0),
            pending: Cell::new(None),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.get() == Some(self.session.get())
    }

    pub fn open(&self) {
        if self.state.get() == ModalState::Open {
            return;
        }
        let stale_send = self.pending.get().is_some();
        self.session.set(self.session.get() + 1);
        self.state.set(ModalState::Open);
        self.surface.set_open(true);
        if stale_send {
            self.surface.set_busy(false);
        }
    }

    pub fn close(&self) {
        if self.state.get() == ModalState::Closed {
            return;
        }
        self.state.set(ModalState::Closed);
        self.surface.set_open(false);
        self.surface.reset_form();
    }

    pub fn handle_pointer(&self, target: PointerTarget) {
        if target == PointerTarget::Overlay {
            self.close();
        }
    }

    pub fn handle_key(&self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    /// Validate and send `draft`.
    ///
    /// Feedback is emitted only after the sender resolves. On success the
    /// dialog closes and its form is cleared; on failure it stays open with
    /// the form intact so the user can retry. If the dialog was reopened while
    /// the send was in flight, the outcome is still notified but the new
    /// session's surface is left alone.
    pub async fn submit(&self, draft: MessageDraft) -> Result<SendAck, SubmitError> {
        if self.state.get() == ModalState::Closed {
            return Err(SubmitError::DialogClosed);
        }
        if self.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }

        let missing = draft.missing_fields();
        if !missing.is_empty() {
            let error = ValidationError { missing };
            self.notifier.notify(&error.to_string(), Severity::Error);
            return Err(error.into());
        }

        let session = self.session.get();
        self.pending.set(Some(session));
        self.surface.set_busy(true);

        let result = self.sender.send(&draft).await;
        let same_session = self.session.get() == session;

        match result {
            Ok(ack) => {
                self.notifier.notify(SEND_SUCCESS_MESSAGE, Severity::Success);
                if same_session {
                    self.close();
                }
                self.finish_submit(session);
                Ok(ack)
            }
            Err(error) => {
                self.finish_submit(session);
                self.notifier
                    .notify(&format!("Failed to send message: {}", error), Severity::Error);
                Err(error.into())
            }
        }
    }

    fn finish_submit(&self, session: u64) {
        if self.pending.get() != Some(session) {
            return;
        }
        self.pending.set(None);
        if self.session.get() == session {
            self.surface.set_busy(false);
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use shared::Notification;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio::sync::Notify;

    #[derive(Debug, Clone, PartialEq)]
    enum SurfaceCall {
        SetOpen(bool),
        ResetForm,
        SetBusy(bool),
    }

    #[derive(Clone, Default)]
    struct RecordingSurface {
        calls: Rc<RefCell<Vec<SurfaceCall>>>,
    }

    impl RecordingSurface {
        fn calls(&self) -> Vec<SurfaceCall> {
            self.calls.borrow().clone()
        }
    }

    impl DialogSurface for RecordingSurface {
        fn set_open(&self, open: bool) {
            self.calls.borrow_mut().push(SurfaceCall::SetOpen(open));
        }

        fn reset_form(&self) {
            self.calls.borrow_mut().push(SurfaceCall::ResetForm);
        }

        fn set_busy(&self, busy: bool) {
            self.calls.borrow_mut().push(SurfaceCall::SetBusy(busy));
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        notes: Rc<RefCell<Vec<Notification>>>,
    }

    impl RecordingSink {
        fn notes(&self) -> Vec<Notification> {
            self.notes.borrow().clone()
        }
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, message: &str, severity: Severity) {
            self.notes.borrow_mut().push(Notification::new(message, severity));
        }
    }

    /// Sender that yields once before answering, recording what it saw.
    /// With a gate it also waits until the gate is released.
    struct FakeSender {
        outcome: Result<SendAck, SendError>,
        sent: Rc<RefCell<Vec<MessageDraft>>>,
        sink: RecordingSink,
        notes_seen_at_send: Rc<RefCell<Vec<usize>>>,
        gate: Option<Rc<Notify>>,
    }

    impl FakeSender {
        fn new(outcome: Result<SendAck, SendError>, sink: &RecordingSink) -> Self {
            Self {
                outcome,
                sent: Rc::default(),
                sink: sink.clone(),
                notes_seen_at_send: Rc::default(),
                gate: None,
            }
        }
    }

    #[async_trait(?Send)]
    impl MessageSender for FakeSender {
        async fn send(&self, draft: &MessageDraft) -> Result<SendAck, SendError> {
            self.sent.borrow_mut().push(draft.clone());
            self.notes_seen_at_send.borrow_mut().push(self.sink.notes.borrow().len());
            tokio::task::yield_now().await;
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.outcome.clone()
        }
    }

    type TestController = MessagingController<FakeSender, RecordingSink, RecordingSurface>;

    fn setup(outcome: Result<SendAck, SendError>) -> (TestController, RecordingSink, RecordingSurface) {
        let sink = RecordingSink::default();
        let surface = RecordingSurface::default();
        let sender = FakeSender::new(outcome, &sink);
        let controller = MessagingController::new(sender, sink.clone(), surface.clone());
        (controller, sink, surface)
    }

    fn rivera_draft() -> MessageDraft {
        MessageDraft {
            recipient: "Ms. Rivera".to_string(),
            subject: "Absence".to_string(),
            body: "My child will be absent Friday.".to_string(),
            priority: "normal".to_string(),
        }
    }

    #[test]
    fn test_open_and_close_toggle_visibility_and_scroll_together() {
        let (controller, _, surface) = setup(Ok(SendAck::default()));
        assert_eq!(controller.state(), ModalState::Closed);

        controller.open();
        assert_eq!(controller.state(), ModalState::Open);
        controller.close();
        assert_eq!(controller.state(), ModalState::Closed);

        assert_eq!(
            surface.calls(),
            vec![SurfaceCall::SetOpen(true), SurfaceCall::SetOpen(false), SurfaceCall::ResetForm]
        );
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let (controller, _, surface) = setup(Ok(SendAck::default()));

        controller.close();
        assert!(surface.calls().is_empty());

        controller.open();
        controller.open();
        assert_eq!(surface.calls(), vec![SurfaceCall::SetOpen(true)]);

        controller.close();
        controller.close();
        assert_eq!(surface.calls().len(), 3);
    }

    #[test]
    fn test_pointer_on_overlay_closes_but_content_does_not() {
        let (controller, _, _) = setup(Ok(SendAck::default()));
        controller.open();

        controller.handle_pointer(PointerTarget::Content);
        assert_eq!(controller.state(), ModalState::Open);

        controller.handle_pointer(PointerTarget::Overlay);
        assert_eq!(controller.state(), ModalState::Closed);
    }

    #[test]
    fn test_only_escape_closes() {
        let (controller, _, surface) = setup(Ok(SendAck::default()));
        controller.open();

        controller.handle_key("Enter");
        controller.handle_key("escape");
        assert_eq!(controller.state(), ModalState::Open);

        controller.handle_key("Escape");
        assert_eq!(controller.state(), ModalState::Closed);

        controller.handle_key("Escape");
        assert_eq!(surface.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_successful_submit_notifies_once_then_closes() {
        let (controller, sink, surface) = setup(Ok(SendAck { message_id: Some(7) }));
        controller.open();

        let ack = controller.submit(rivera_draft()).await.unwrap();
        assert_eq!(ack.message_id, Some(7));
        assert_eq!(controller.state(), ModalState::Closed);
        assert!(!controller.is_submitting());

        assert_eq!(
            sink.notes(),
            vec![Notification::new(SEND_SUCCESS_MESSAGE, Severity::Success)]
        );
        assert_eq!(*controller.sender.notes_seen_at_send.borrow(), vec![0]);
        assert_eq!(*controller.sender.sent.borrow(), vec![rivera_draft()]);

        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::SetOpen(true),
                SurfaceCall::SetBusy(true),
                SurfaceCall::SetOpen(false),
                SurfaceCall::ResetForm,
                SurfaceCall::SetBusy(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_dialog_open() {
        let (controller, sink, surface) = setup(Ok(SendAck::default()));
        controller.open();

        let draft = MessageDraft {
            subject: String::new(),
            body: "   ".to_string(),
            ..rivera_draft()
        };
        let result = controller.submit(draft).await;

        assert_eq!(
            result,
            Err(SubmitError::Validation(ValidationError {
                missing: vec!["subject", "message"]
            }))
        );
        assert_eq!(controller.state(), ModalState::Open);
        assert!(controller.sender.sent.borrow().is_empty());

        let notes = sink.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert_eq!(notes[0].message, "Please fill in all required fields: subject, message");
        assert_eq!(surface.calls(), vec![SurfaceCall::SetOpen(true)]);
    }

    #[tokio::test]
    async fn test_send_failure_keeps_form_and_reverts_busy() {
        let failure = SendError::Rejected {
            status: 500,
            message: "Database unavailable".to_string(),
        };
        let (controller, sink, surface) = setup(Err(failure.clone()));
        controller.open();

        let result = controller.submit(rivera_draft()).await;
        assert_eq!(result, Err(SubmitError::Send(failure)));
        assert_eq!(controller.state(), ModalState::Open);
        assert!(!controller.is_submitting());

        let notes = sink.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert!(notes[0].message.contains("Database unavailable"));

        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::SetOpen(true),
                SurfaceCall::SetBusy(true),
                SurfaceCall::SetBusy(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_while_closed_is_rejected() {
        let (controller, sink, _) = setup(Ok(SendAck::default()));

        let result = controller.submit(rivera_draft()).await;
        assert_eq!(result, Err(SubmitError::DialogClosed));
        assert!(sink.notes().is_empty());
        assert!(controller.sender.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let (controller, sink, _) = setup(Ok(SendAck::default()));
        controller.open();

        let (first, second) = tokio::join!(
            controller.submit(rivera_draft()),
            controller.submit(rivera_draft())
        );

        assert!(first.is_ok());
        assert_eq!(second, Err(SubmitError::AlreadySubmitting));
        assert_eq!(controller.sender.sent.borrow().len(), 1);
        assert_eq!(sink.notes().len(), 1);
    }

    #[tokio::test]
    async fn test_reopen_after_success_starts_clean() {
        let (controller, sink, surface) = setup(Ok(SendAck::default()));
        controller.open();
        controller.submit(rivera_draft()).await.unwrap();

        controller.open();
        assert_eq!(controller.state(), ModalState::Open);
        assert!(!controller.is_submitting());
        assert_eq!(surface.calls().last(), Some(&SurfaceCall::SetOpen(true)));
        assert_eq!(sink.notes().len(), 1);
    }

    #[tokio::test]
    async fn test_late_success_leaves_reopened_dialog_alone() {
        let (mut controller, sink, surface) = setup(Ok(SendAck::default()));
        let release = Rc::new(Notify::new());
        controller.sender.gate = Some(release.clone());
        controller.open();

        let reopen_while_sending = async {
            tokio::task::yield_now().await;
            controller.close();
            controller.open();
            assert_eq!(controller.state(), ModalState::Open);
            assert!(!controller.is_submitting());
            release.notify_one();
        };
        let (result, ()) = tokio::join!(controller.submit(rivera_draft()), reopen_while_sending);

        assert!(result.is_ok());
        assert_eq!(controller.state(), ModalState::Open);
        assert!(!controller.is_submitting());
        assert_eq!(
            sink.notes(),
            vec![Notification::new(SEND_SUCCESS_MESSAGE, Severity::Success)]
        );
        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::SetOpen(true),
                SurfaceCall::SetBusy(true),
                SurfaceCall::SetOpen(false),
                SurfaceCall::ResetForm,
                SurfaceCall::SetOpen(true),
                SurfaceCall::SetBusy(false),
            ]
        );

        // The reopened session submits and closes normally
        release.notify_one();
        controller.submit(rivera_draft()).await.unwrap();
        assert_eq!(controller.state(), ModalState::Closed);
        assert_eq!(sink.notes().len(), 2);
    }

    #[tokio::test]
    async fn test_close_during_send_then_success_only_clears_busy() {
        let (controller, sink, surface) = setup(Ok(SendAck::default()));
        controller.open();

        let close_while_sending = async {
            controller.close();
        };
        let (result, ()) = tokio::join!(controller.submit(rivera_draft()), close_while_sending);

        assert!(result.is_ok());
        assert_eq!(controller.state(), ModalState::Closed);
        assert_eq!(sink.notes().len(), 1);
        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::SetOpen(true),
                SurfaceCall::SetBusy(true),
                SurfaceCall::SetOpen(false),
                SurfaceCall::ResetForm,
                SurfaceCall::SetBusy(false),
            ]
        );
    }
}
