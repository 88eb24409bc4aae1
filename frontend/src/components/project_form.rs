use super::super::{Model, Msg};
use super::utils::{on_submit, render_text_input};
use shared::FormField;
use yew::prelude::*;

/// Project settings tied to the signed-in account.
pub fn render_project_form(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let form = &model.project_form;

    html! {
        <section class="project-section">
            <h3><i class="fa-brands fa-github"></i>{" Project"}</h3>
            <form class="project-form" onsubmit={on_submit(link, || Msg::SubmitProject)}>
                { render_text_input(link, "project-repo", FormField::GithubRepoUrl.label(), "url", &form.github_repo_url,
                    |v| Msg::SetProjectField(FormField::GithubRepoUrl, v)) }
                { render_text_input(link, "project-users", FormField::ExpectedUsers.label(), "number", &form.expected_users,
                    |v| Msg::SetProjectField(FormField::ExpectedUsers, v)) }
                <button type="submit" class="secondary-button" disabled={model.loading}>
                    {"Save project"}
                </button>
            </form>
        </section>
    }
}
