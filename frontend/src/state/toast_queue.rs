use shared::Notification;
use std::rc::Rc;
use yew::Reducible;

/// Toasts beyond this many push the oldest one out
pub const MAX_VISIBLE_TOASTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastQueue {
    pub toasts: Vec<Toast>,
    next_id: u32,
}

pub enum ToastAction {
    Push(Notification),
    Dismiss(u32),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(notification) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    notification,
                });
                next.next_id = next.next_id.wrapping_add(1);
                if next.toasts.len() > MAX_VISIBLE_TOASTS {
                    let overflow = next.toasts.len() - MAX_VISIBLE_TOASTS;
                    next.toasts.drain(..overflow);
                }
            }
            ToastAction::Dismiss(id) => next.toasts.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}
