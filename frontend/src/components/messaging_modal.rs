use shared::Notification;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::use_messaging_modal::use_messaging_modal;
use crate::services::senders::PortalSender;
use crate::state::FormAction;

pub const PRIORITIES: [(&str, &str); 3] = [("low", "Low"), ("normal", "Normal"), ("high", "High")];

/// One choice in the recipient picker
#[derive(Debug, Clone, PartialEq)]
pub struct RecipientOption {
    pub value: String,
    pub label: String,
}

#[derive(Properties, PartialEq)]
pub struct MessagingModalProps {
    pub sender: PortalSender,
    pub recipients: Vec<RecipientOption>,
    pub on_notify: Callback<Notification>,
}

/// "Message a teacher" button plus the dialog it opens
#[function_component(MessagingModal)]
pub fn messaging_modal(props: &MessagingModalProps) -> Html {
    let modal = use_messaging_modal(props.sender.clone(), props.on_notify.clone());
    let draft = modal.form.draft.clone();

    let on_recipient_change = {
        let form = modal.form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetRecipient(select.value()));
        })
    };

    let on_subject_input = {
        let form = modal.form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetSubject(input.value()));
        })
    };

    let on_body_input = {
        let form = modal.form.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetBody(textarea.value()));
        })
    };

    let on_priority_change = {
        let form = modal.form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetPriority(select.value()));
        })
    };

    let on_open = {
        let open = modal.actions.open.clone();
        Callback::from(move |_: MouseEvent| open.emit(()))
    };

    let on_close = {
        let close = modal.actions.close.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };

    let on_submit = {
        let submit = modal.actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    html! {
        <>
            <button class="btn btn-primary message-teacher-btn" onclick={on_open}>
                {"✉️ Message Teacher"}
            </button>

            if modal.visible {
                <div class="modal-overlay" onclick={modal.actions.on_overlay_click.clone()}>
                    <div class="modal-content messaging-modal" role="dialog" aria-modal="true">
                        <div class="modal-header">
                            <h2>{"Message a Teacher"}</h2>
                            {if props.sender.is_simulated() {
                                html! { <span class="modal-badge">{"Offline preview"}</span> }
                            } else { html! {} }}
                            <button class="modal-close" onclick={on_close.clone()} aria-label="Close">{"×"}</button>
                        </div>

                        <form class="modal-body message-form" onsubmit={on_submit}>
                            <div class="form-group">
                                <label for="message-recipient">{"Teacher"}</label>
                                <select id="message-recipient" onchange={on_recipient_change} disabled={modal.busy}>
                                    <option value="" selected={draft.recipient.is_empty()}>{"Select a teacher"}</option>
                                    {for props.recipients.iter().map(|option| html! {
                                        <option
                                            value={option.value.clone()}
                                            selected={draft.recipient == option.value}
                                        >
                                            {option.label.clone()}
                                        </option>
                                    })}
                                </select>
                            </div>

                            <div class="form-group">
                                <label for="message-subject">{"Subject"}</label>
                                <input
                                    id="message-subject"
                                    type="text"
                                    value={draft.subject.clone()}
                                    oninput={on_subject_input}
                                    disabled={modal.busy}
                                />
                            </div>

                            <div class="form-group">
                                <label for="message-body">{"Message"}</label>
                                <textarea
                                    id="message-body"
                                    rows="5"
                                    value={draft.body.clone()}
                                    oninput={on_body_input}
                                    disabled={modal.busy}
                                />
                            </div>

                            <div class="form-group">
                                <label for="message-priority">{"Priority"}</label>
                                <select id="message-priority" onchange={on_priority_change} disabled={modal.busy}>
                                    {for PRIORITIES.iter().map(|(value, label)| html! {
                                        <option value={*value} selected={draft.priority == *value}>{*label}</option>
                                    })}
                                </select>
                            </div>

                            <div class="modal-footer">
                                <button type="button" class="btn btn-secondary" onclick={on_close} disabled={modal.busy}>
                                    {"Cancel"}
                                </button>
                                <button type="submit" class="btn btn-primary" disabled={modal.busy}>
                                    {if modal.busy {
                                        html! { <><span class="loading-spinner"></span>{" Sending..."}</> }
                                    } else {
                                        html! { {"Send Message"} }
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            }
        </>
    }
}
