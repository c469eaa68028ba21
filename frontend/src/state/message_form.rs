use shared::MessageDraft;
use std::rc::Rc;
use yew::Reducible;

pub const DEFAULT_PRIORITY: &str = "normal";

/// Field values of the messaging dialog's form
#[derive(Debug, Clone, PartialEq)]
pub struct MessageForm {
    pub draft: MessageDraft,
}

impl Default for MessageForm {
    fn default() -> Self {
        Self {
            draft: MessageDraft {
                priority: DEFAULT_PRIORITY.to_string(),
                ..MessageDraft::default()
            },
        }
    }
}

pub enum FormAction {
    SetRecipient(String),
    SetSubject(String),
    SetBody(String),
    SetPriority(String),
    Reset,
}

impl Reducible for MessageForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut draft = self.draft.clone();
        match action {
            FormAction::SetRecipient(value) => draft.recipient = value,
            FormAction::SetSubject(value) => draft.subject = value,
            FormAction::SetBody(value) => draft.body = value,
            FormAction::SetPriority(value) => draft.priority = value,
            FormAction::Reset => return Rc::new(Self::default()),
        }
        Rc::new(Self { draft })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_defaults() {
        let form = Rc::new(MessageForm::default())
            .reduce(FormAction::SetRecipient("3".to_string()))
            .reduce(FormAction::SetBody("Hello".to_string()))
            .reduce(FormAction::SetPriority("high".to_string()));
        assert_eq!(form.draft.recipient, "3");
        assert_eq!(form.draft.priority, "high");

        let form = form.reduce(FormAction::Reset);
        assert_eq!(*form, MessageForm::default());
        assert_eq!(form.draft.priority, DEFAULT_PRIORITY);
        assert!(form.draft.body.is_empty());
    }
}
