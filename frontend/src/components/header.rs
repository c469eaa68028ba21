use shared::UserProfile;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub user: Option<UserProfile>,
    pub session_loading: bool,
    pub on_sign_in: Callback<(String, String)>,
    pub on_sign_out: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let on_sign_in = props.on_sign_in.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_sign_in.emit(((*username).clone(), (*password).clone()));
            password.set(String::new());
        })
    };

    let on_sign_out = {
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_: MouseEvent| on_sign_out.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>
                    {match &props.user {
                        Some(user) => format!("Welcome, {}", user.name),
                        None => "Campus Portal".to_string(),
                    }}
                </h1>
                <div class="header-right">
                    {if props.session_loading {
                        html! { <span class="session-status">{"Loading..."}</span> }
                    } else if let Some(user) = &props.user {
                        html! {
                            <div class="session-info">
                                <span class="session-role">{user.role.to_string()}</span>
                                <button class="btn btn-secondary" onclick={on_sign_out}>{"Sign out"}</button>
                            </div>
                        }
                    } else {
                        html! {
                            <form class="sign-in-form" onsubmit={on_submit}>
                                <input
                                    type="text"
                                    placeholder="Username"
                                    value={(*username).clone()}
                                    oninput={on_username_input}
                                />
                                <input
                                    type="password"
                                    placeholder="Password"
                                    value={(*password).clone()}
                                    oninput={on_password_input}
                                />
                                <button type="submit" class="btn btn-primary">{"Sign in"}</button>
                            </form>
                        }
                    }}
                </div>
            </div>
        </header>
    }
}
