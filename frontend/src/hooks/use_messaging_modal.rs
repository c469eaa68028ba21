use gloo::events::EventListener;
use shared::Notification;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::senders::PortalSender;
use crate::state::{DialogSurface, FormAction, MessageForm, MessagingController, PointerTarget, SubmitError};

pub type PortalController = MessagingController<PortalSender, Callback<Notification>, WebDialogSurface>;

/// Dialog surface backed by component state and the page `<body>`
#[derive(Clone)]
pub struct WebDialogSurface {
    visible: UseStateHandle<bool>,
    busy: UseStateHandle<bool>,
    form: UseReducerDispatcher<MessageForm>,
}

impl DialogSurface for WebDialogSurface {
    fn set_open(&self, open: bool) {
        self.visible.set(open);
        set_page_scroll_locked(open);
    }

    fn reset_form(&self) {
        self.form.dispatch(FormAction::Reset);
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }
}

fn set_page_scroll_locked(locked: bool) {
    let Some(body) = gloo::utils::document().body() else {
        return;
    };
    let overflow = if locked { "hidden" } else { "auto" };
    if let Err(e) = body.style().set_property("overflow", overflow) {
        gloo::console::error!("Failed to toggle page scroll", e);
    }
}

pub struct UseMessagingModalResult {
    pub visible: bool,
    pub busy: bool,
    pub form: UseReducerHandle<MessageForm>,
    pub actions: UseMessagingModalActions,
}

#[derive(Clone)]
pub struct UseMessagingModalActions {
    pub open: Callback<()>,
    pub close: Callback<()>,
    /// Pointer press on the overlay; closes only when the overlay itself was hit
    pub on_overlay_click: Callback<MouseEvent>,
    pub submit: Callback<()>,
}

/// Messaging dialog state wired to a [`MessagingController`].
///
/// A new controller is built whenever `sender` changes; the previous one is
/// closed first so the page never stays scroll-locked behind a dead dialog.
#[hook]
pub fn use_messaging_modal(sender: PortalSender, on_notify: Callback<Notification>) -> UseMessagingModalResult {
    let visible = use_state(|| false);
    let busy = use_state(|| false);
    let form = use_reducer(MessageForm::default);

    let controller: Rc<PortalController> = {
        let surface = WebDialogSurface {
            visible: visible.clone(),
            busy: busy.clone(),
            form: form.dispatcher(),
        };
        use_memo(sender.clone(), move |sender| {
            MessagingController::new(sender.clone(), on_notify, surface)
        })
    };

    // Escape closes the dialog from anywhere on the page
    {
        let controller = controller.clone();
        use_effect_with(sender, move |_| {
            let on_key = controller.clone();
            let listener = EventListener::new(&gloo::utils::document(), "keydown", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    on_key.handle_key(&event.key());
                }
            });
            move || {
                drop(listener);
                controller.close();
            }
        });
    }

    let open = {
        let controller = controller.clone();
        Callback::from(move |_: ()| controller.open())
    };

    let close = {
        let controller = controller.clone();
        Callback::from(move |_: ()| controller.close())
    };

    let on_overlay_click = {
        let controller = controller.clone();
        Callback::from(move |event: MouseEvent| {
            let target = if event.target() == event.current_target() {
                PointerTarget::Overlay
            } else {
                PointerTarget::Content
            };
            controller.handle_pointer(target);
        })
    };

    let submit = {
        let controller = controller.clone();
        let form = form.clone();
        Callback::from(move |_: ()| {
            let controller = controller.clone();
            let draft = form.draft.clone();
            spawn_local(async move {
                match controller.submit(draft).await {
                    Ok(_) => Logger::info_with_component("messaging_modal", "Message delivered"),
                    Err(SubmitError::Send(e)) => {
                        Logger::warn_with_component("messaging_modal", &format!("Message not delivered: {}", e))
                    }
                    Err(SubmitError::AlreadySubmitting) | Err(SubmitError::DialogClosed) => {
                        gloo::console::debug!("Ignored submit while the dialog was busy or closed")
                    }
                    Err(SubmitError::Validation(_)) => {}
                }
            });
        })
    };

    UseMessagingModalResult {
        visible: *visible,
        busy: *busy,
        form,
        actions: UseMessagingModalActions {
            open,
            close,
            on_overlay_click,
            submit,
        },
    }
}
