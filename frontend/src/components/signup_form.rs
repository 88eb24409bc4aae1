use super::super::{Model, Msg};
use super::utils::{on_submit, render_text_input};
use shared::{FormField, Route};
use yew::prelude::*;

pub fn render_signup(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let form = &model.signup_form;

    html! {
        <section class="auth-card">
            <h2>{"Create an account"}</h2>
            <form class="auth-form" onsubmit={on_submit(link, || Msg::SubmitSignup)}>
                { render_text_input(link, "signup-email", FormField::Email.label(), "email", &form.email,
                    |v| Msg::SetSignupField(FormField::Email, v)) }
                { render_text_input(link, "signup-password", FormField::Password.label(), "password", &form.password,
                    |v| Msg::SetSignupField(FormField::Password, v)) }
                { render_text_input(link, "signup-repo", FormField::GithubRepoUrl.label(), "url", &form.github_repo_url,
                    |v| Msg::SetSignupField(FormField::GithubRepoUrl, v)) }
                { render_text_input(link, "signup-usage", FormField::PrimaryUsageTime.label(), "text", &form.primary_usage_time,
                    |v| Msg::SetSignupField(FormField::PrimaryUsageTime, v)) }
                { render_text_input(link, "signup-users", FormField::ExpectedUsers.label(), "number", &form.expected_users,
                    |v| Msg::SetSignupField(FormField::ExpectedUsers, v)) }
                <button type="submit" class="primary-button" disabled={model.loading}>
                    if model.loading {
                        <><i class="fa-solid fa-spinner fa-spin"></i>{" Creating account..."}</>
                    } else {
                        {"Sign up"}
                    }
                </button>
            </form>
            <p class="auth-alternatives">
                {"Already registered? "}
                <a href="#" onclick={link.callback(|e: MouseEvent| {
                    e.prevent_default();
                    Msg::Navigate(Route::Login)
                })}>{"Sign in"}</a>
            </p>
        </section>
    }
}
