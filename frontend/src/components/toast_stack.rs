use gloo::timers::callback::Timeout;
use shared::{Notification, Severity};
use yew::prelude::*;

use crate::state::{NotificationSink, Toast};

impl NotificationSink for Callback<Notification> {
    fn notify(&self, message: &str, severity: Severity) {
        self.emit(Notification::new(message, severity));
    }
}

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✅",
        Severity::Info => "ℹ️",
        Severity::Warning => "⚠️",
        Severity::Error => "❌",
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub ttl_ms: u32,
    pub on_dismiss: Callback<u32>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack" aria-live="polite">
            {for props.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id}
                    toast={toast.clone()}
                    ttl_ms={props.ttl_ms}
                    on_dismiss={props.on_dismiss.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    ttl_ms: u32,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    // Auto-dismiss; dropping the timeout on unmount cancels it
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with((props.toast.id, props.ttl_ms), move |(id, ttl_ms)| {
            let id = *id;
            let timeout = Timeout::new(*ttl_ms, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id;
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    let severity = props.toast.notification.severity;
    html! {
        <div class={classes!("toast", format!("toast-{}", severity))} role="status">
            <span class="toast-icon">{icon(severity)}</span>
            <span class="toast-message">{props.toast.notification.message.clone()}</span>
            <button class="toast-close" onclick={onclick} aria-label="Dismiss">{"×"}</button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_callback_sink_emits_notification() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let received = received.clone();
            Callback::from(move |notification: Notification| received.borrow_mut().push(notification))
        };

        sink.notify("Message sent successfully!", Severity::Success);

        assert_eq!(
            *received.borrow(),
            vec![Notification::new("Message sent successfully!", Severity::Success)]
        );
    }
}
