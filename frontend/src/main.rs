mod components;
mod hooks;
mod services;
mod state;

use shared::{AnalyticsChartsResponse, ChartSpec, Notification, Role, Severity, TeacherContact, UserProfile};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::chart_presenter::ChartPresenter;
use components::header::Header;
use components::messaging_modal::{MessagingModal, RecipientOption};
use components::toast_stack::ToastStack;
use services::api::ApiClient;
use services::config::FrontendConfig;
use services::logging::Logger;
use services::senders::{PortalSender, SimulatedSender};
use state::{ToastAction, ToastQueue};

/// Recipients offered while nobody is signed in
const PREVIEW_RECIPIENTS: [&str; 4] = ["Mrs. Johnson", "Dr. Smith", "Mr. Davis", "Ms. Wilson"];

fn recipient_options(sender: &PortalSender, teachers: &[TeacherContact]) -> Vec<RecipientOption> {
    match sender {
        PortalSender::Api(_) => teachers
            .iter()
            .map(|teacher| RecipientOption {
                value: teacher.id.to_string(),
                label: teacher.name.clone(),
            })
            .collect(),
        PortalSender::Simulated(_) => PREVIEW_RECIPIENTS
            .iter()
            .map(|name| RecipientOption {
                value: name.to_string(),
                label: name.to_string(),
            })
            .collect(),
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| FrontendConfig::from_document());
    let api_client = {
        let config = config.clone();
        use_state(move || ApiClient::new(&config.api_base_url))
    };
    let user = use_state(|| Option::<UserProfile>::None);
    let session_loading = use_state(|| true);
    let teachers = use_state(Vec::<TeacherContact>::new);
    let charts = use_state(|| AnalyticsChartsResponse {
        booking_trends: ChartSpec::bookings_trend(),
        classroom_utilization: ChartSpec::classroom_utilization(),
    });
    let toasts = use_reducer(ToastQueue::default);

    let on_notify = {
        let toasts = toasts.dispatcher();
        use_callback((), move |notification: Notification, _| {
            toasts.dispatch(ToastAction::Push(notification));
        })
    };

    let on_dismiss_toast = {
        let toasts = toasts.dispatcher();
        use_callback((), move |id: u32, _| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    // Resolve the session, and the teacher list for students, whenever the client changes
    {
        let user = user.clone();
        let teachers = teachers.clone();
        let session_loading = session_loading.clone();
        use_effect_with((*api_client).clone(), move |client| {
            let client = client.clone();
            session_loading.set(true);
            spawn_local(async move {
                match client.auth_status().await {
                    Ok(status) => {
                        let profile = status.user.filter(|_| status.authenticated);
                        if profile.as_ref().map(|p| p.role) == Some(Role::Student) {
                            match client.list_teachers().await {
                                Ok(list) => teachers.set(list),
                                Err(e) => Logger::warn_with_component("app", &e),
                            }
                        } else {
                            teachers.set(Vec::new());
                        }
                        user.set(profile);
                    }
                    Err(e) => {
                        Logger::warn_with_component("app", &format!("Session check failed: {}", e));
                        user.set(None);
                    }
                }
                session_loading.set(false);
            });
            || ()
        });
    }

    // Server-provided charts replace the built-in presets when reachable
    {
        let charts = charts.clone();
        let client = (*api_client).clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match client.analytics_charts().await {
                    Ok(response) => charts.set(response),
                    Err(e) => gloo::console::warn!(format!("Using built-in charts: {}", e)),
                }
            });
            || ()
        });
    }

    let on_sign_in = {
        let api_client = api_client.clone();
        let on_notify = on_notify.clone();
        Callback::from(move |(username, password): (String, String)| {
            let api_client = api_client.clone();
            let on_notify = on_notify.clone();
            spawn_local(async move {
                match api_client.login(&username, &password).await {
                    Ok((client, login)) => {
                        on_notify.emit(Notification::new(
                            format!("Signed in as {}", login.user.name),
                            Severity::Success,
                        ));
                        api_client.set(client);
                    }
                    Err(e) => on_notify.emit(Notification::new(format!("Sign in failed: {}", e), Severity::Error)),
                }
            });
        })
    };

    let on_sign_out = {
        let api_client = api_client.clone();
        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            spawn_local(async move {
                let client = api_client.logout().await;
                api_client.set(client);
            });
        })
    };

    let sender = match &*user {
        Some(profile) if profile.role == Role::Student && api_client.has_session() => {
            PortalSender::Api((*api_client).clone())
        }
        _ => PortalSender::Simulated(SimulatedSender::new(config.simulated_send_delay_ms)),
    };
    let recipients = recipient_options(&sender, &teachers);

    html! {
        <div class="app">
            <Header
                user={(*user).clone()}
                session_loading={*session_loading}
                on_sign_in={on_sign_in}
                on_sign_out={on_sign_out}
            />

            <main class="main">
                <div class="container">
                    <section class="messaging-section">
                        <MessagingModal sender={sender} recipients={recipients} on_notify={on_notify} />
                    </section>

                    <section class="analytics-section">
                        <ChartPresenter
                            spec={charts.booking_trends.clone()}
                            surface_id="bookingsTrendChart"
                            title="Bookings Trend"
                        />
                        <ChartPresenter
                            spec={charts.classroom_utilization.clone()}
                            surface_id="classroomUtilizationChart"
                            title="Classroom Utilization"
                        />
                    </section>
                </div>
            </main>

            <ToastStack
                toasts={toasts.toasts.clone()}
                ttl_ms={config.toast_ttl_ms}
                on_dismiss={on_dismiss_toast}
            />
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(id: u32, name: &str) -> TeacherContact {
        TeacherContact {
            id,
            name: name.to_string(),
            email: format!("{}@school.edu", name),
        }
    }

    #[test]
    fn test_api_recipients_use_teacher_ids() {
        let sender = PortalSender::Api(ApiClient::with_base_url("http://localhost:5001", Some("t".to_string())));
        let options = recipient_options(&sender, &[teacher(2, "teacher1")]);
        assert_eq!(
            options,
            vec![RecipientOption {
                value: "2".to_string(),
                label: "teacher1".to_string()
            }]
        );
    }

    #[test]
    fn test_preview_recipients_when_simulated() {
        let sender = PortalSender::Simulated(SimulatedSender::new(1500));
        let options = recipient_options(&sender, &[teacher(2, "teacher1")]);
        assert_eq!(options.len(), PREVIEW_RECIPIENTS.len());
        assert_eq!(options[0].value, "Mrs. Johnson");
    }
}
