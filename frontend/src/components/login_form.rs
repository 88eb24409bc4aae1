use super::super::{Model, Msg};
use super::utils::{on_submit, render_text_input};
use shared::{FormField, Route};
use yew::prelude::*;

pub fn render_login(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let form = &model.login_form;

    html! {
        <section class="auth-card">
            <h2>{"Sign in"}</h2>
            <form class="auth-form" onsubmit={on_submit(link, || Msg::SubmitLogin)}>
                { render_text_input(link, "login-email", FormField::Email.label(), "email", &form.email,
                    |v| Msg::SetLoginField(FormField::Email, v)) }
                { render_text_input(link, "login-password", FormField::Password.label(), "password", &form.password,
                    |v| Msg::SetLoginField(FormField::Password, v)) }
                <button type="submit" class="primary-button" disabled={model.loading}>
                    if model.loading {
                        <><i class="fa-solid fa-spinner fa-spin"></i>{" Signing in..."}</>
                    } else {
                        {"Sign in"}
                    }
                </button>
            </form>
            <div class="auth-alternatives">
                <button class="secondary-button" onclick={link.callback(|_| Msg::LoginWithTestAccount)}>
                    <i class="fa-solid fa-flask"></i>{" Use test account"}
                </button>
                <p>
                    {"No account yet? "}
                    <a href="#" onclick={link.callback(|e: MouseEvent| {
                        e.prevent_default();
                        Msg::Navigate(Route::Signup)
                    })}>{"Sign up"}</a>
                </p>
            </div>
        </section>
    }
}
