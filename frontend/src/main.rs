mod api;
mod components;

use api::{BrowserStorage, BrowserTransport};
use chrono::Local;
use components::context_form::render_context_form;
use components::handlers;
use components::header::render_header;
use components::login_form::render_login;
use components::project_form::render_project_form;
use components::results::render_results;
use components::signup_form::render_signup;
use components::utils::render_error_message;
use gloo_events::EventListener;
use shared::{
    AuthClient, ContextBuilder, ContextForm, FormField, LoginForm, PredictionClient,
    PredictionOutcome, ProjectForm, RequestError, ResultTab, Route, SessionStore, SignupForm,
    SubmissionTicket, SubmissionTracker, SubmitError, TokenResponse, guard,
};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Navigation
    Navigate(Route),
    PathChanged(Route),

    // Session
    SetLoginField(FormField, String),
    SubmitLogin,
    LoginFinished(String, Result<TokenResponse, RequestError>),
    LoginWithTestAccount,
    Logout,
    SetSignupField(FormField, String),
    SubmitSignup,
    SignupFinished(String, Result<TokenResponse, RequestError>),

    // Prediction
    SetContextField(FormField, String),
    SubmitPrediction,
    PredictionFinished(SubmissionTicket, Result<PredictionOutcome, SubmitError>),
    SelectTab(ResultTab),

    // Project
    SetProjectField(FormField, String),
    SubmitProject,
    ProjectFinished(Result<(), RequestError>),
}

// Main component
pub struct Model {
    route: Route,
    session: SessionStore<BrowserStorage>,
    builder: ContextBuilder<Local>,
    prediction_client: PredictionClient<BrowserTransport>,
    auth_client: AuthClient<BrowserTransport>,
    login_form: LoginForm,
    signup_form: SignupForm,
    context_form: ContextForm,
    project_form: ProjectForm,
    submissions: SubmissionTracker,
    outcome: Option<PredictionOutcome>,
    tab: ResultTab,
    loading: bool,
    notice: Option<String>,
    error: Option<String>,
    popstate_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = api::api_config();
        let mut session = SessionStore::new(BrowserStorage);
        session.restore();

        let requested = Route::from_path(&api::current_path());
        let mut model = Self {
            route: guard(requested, session.session()),
            session,
            builder: ContextBuilder::new(Local),
            prediction_client: PredictionClient::new(config.clone(), BrowserTransport),
            auth_client: AuthClient::new(config, BrowserTransport),
            login_form: LoginForm::default(),
            signup_form: SignupForm::default(),
            context_form: ContextForm::with_defaults(api::local_now()),
            project_form: ProjectForm::default(),
            submissions: SubmissionTracker::new(),
            outcome: None,
            tab: ResultTab::default(),
            loading: false,
            notice: None,
            error: None,
            popstate_listener: None,
        };
        api::push_path(model.route.path());
        handlers::check_service_health(&model.prediction_client);

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "popstate", move |_| {
                link.send_message(Msg::PathChanged(Route::from_path(&api::current_path())));
            });
            model.popstate_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(route) => handlers::handle_navigate(self, route, true),
            Msg::PathChanged(route) => handlers::handle_navigate(self, route, false),

            Msg::SetLoginField(field, value) => {
                self.login_form.set(field, value);
                true
            }
            Msg::SubmitLogin => handlers::handle_submit_login(self, ctx),
            Msg::LoginFinished(email, result) => {
                handlers::handle_login_finished(self, ctx, email, result)
            }
            Msg::LoginWithTestAccount => handlers::handle_test_login(self, ctx),
            Msg::Logout => handlers::handle_logout(self, ctx),
            Msg::SetSignupField(field, value) => {
                self.signup_form.set(field, value);
                true
            }
            Msg::SubmitSignup => handlers::handle_submit_signup(self, ctx),
            Msg::SignupFinished(email, result) => {
                handlers::handle_login_finished(self, ctx, email, result)
            }

            Msg::SetContextField(field, value) => {
                self.context_form.set(field, value);
                true
            }
            Msg::SubmitPrediction => handlers::handle_submit_prediction(self, ctx),
            Msg::PredictionFinished(ticket, outcome) => {
                handlers::handle_prediction_finished(self, ctx, ticket, outcome)
            }
            Msg::SelectTab(tab) => {
                self.tab = tab;
                true
            }

            Msg::SetProjectField(field, value) => {
                self.project_form.set(field, value);
                true
            }
            Msg::SubmitProject => handlers::handle_submit_project(self, ctx),
            Msg::ProjectFinished(result) => handlers::handle_project_finished(self, result),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        // Re-checked on every render so a logout anywhere revokes the view.
        let route = guard(self.route, self.session.session());

        html! {
            <div class="container">
                { render_header(self, ctx) }

                <main class="main-content">
                { render_error_message(self) }
                {
                    match route {
                        Route::Login => render_login(self, ctx),
                        Route::Signup => render_signup(self, ctx),
                        Route::Predict => html! {
                            <>
                                { render_context_form(self, ctx) }
                                { render_results(self, ctx) }
                                { render_project_form(self, ctx) }
                            </>
                        },
                    }
                }
                </main>

                <footer class="app-footer">
                    <p>{"Context-aware Metric Prediction | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.submissions.cancel();
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
