use super::super::{Model, Msg};
use super::utils::debounce;
use shared::Route;
use yew::prelude::*;

/// Renders the application header with the signed-in account, if any.
pub fn render_header(model: &Model, ctx: &Context<Model>) -> Html {
    let session = model.session.session();

    let account = match session.email() {
        Some(email) => {
            let link = ctx.link().clone();
            let on_logout = debounce(300, move || link.send_message(Msg::Logout));
            let on_predict = ctx.link().callback(|_: MouseEvent| Msg::Navigate(Route::Predict));

            html! {
                <nav class="account-nav">
                    <button class="nav-link" onclick={on_predict}>
                        <i class="fa-solid fa-chart-line"></i>{" Predict"}
                    </button>
                    <span class="account-email" title={email.to_string()}>
                        <i class="fa-solid fa-user"></i>{ format!(" {}", email) }
                        if session.is_test_account() {
                            <span class="badge">{"test"}</span>
                        }
                    </span>
                    <button class="logout-button" onclick={on_logout}>
                        <i class="fa-solid fa-right-from-bracket"></i>{" Logout"}
                    </button>
                </nav>
            }
        }
        None => html! {},
    };

    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-wave-square"></i>{" Metric Prediction"}</h1>
            <p class="subtitle">{"Forecast service metrics from deployment context"}</p>
            { account }
        </header>
    }
}
