use super::super::{Model, Msg};
use crate::api::{BrowserTransport, push_path};
use shared::{
    LoginForm, PredictionClient, PredictionOutcome, RequestError, Route, SignupForm,
    SubmissionTicket, SubmitError, TokenResponse, guard, submit_prediction,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Logs whether the prediction service answers, once per app start.
pub fn check_service_health(client: &PredictionClient<BrowserTransport>) {
    let client = client.clone();
    spawn_local(async move {
        match client.check_health().await {
            Ok(status) => log::info!("Prediction service is up: {}", status),
            Err(e) => log::warn!("Prediction service health check failed: {}", e),
        }
    });
}

pub fn handle_navigate(model: &mut Model, route: Route, push: bool) -> bool {
    let target = guard(route, model.session.session());
    if target != model.route {
        model.error = None;
        model.notice = None;
    }
    model.route = target;
    if push || target != route {
        push_path(target.path());
    }
    true
}

pub fn handle_submit_login(model: &mut Model, ctx: &Context<Model>) -> bool {
    let (email, password) = match model.login_form.validate() {
        Ok(credentials) => credentials,
        Err(e) => {
            model.error = Some(e.to_string());
            return true;
        }
    };

    model.loading = true;
    model.error = None;
    spawn_local({
        let client = model.auth_client.clone();
        let link = ctx.link().clone();

        async move {
            let result = client.login(&email, &password).await;
            link.send_message(Msg::LoginFinished(email, result));
        }
    });
    true
}

pub fn handle_submit_signup(model: &mut Model, ctx: &Context<Model>) -> bool {
    let request = match model.signup_form.to_request() {
        Ok(request) => request,
        Err(e) => {
            model.error = Some(e.to_string());
            return true;
        }
    };

    model.loading = true;
    model.error = None;
    spawn_local({
        let client = model.auth_client.clone();
        let link = ctx.link().clone();

        async move {
            let result = client.signup_and_login(&request).await;
            link.send_message(Msg::SignupFinished(request.email, result));
        }
    });
    true
}

/// Shared by login and signup: both end with a token for `email`.
pub fn handle_login_finished(
    model: &mut Model,
    ctx: &Context<Model>,
    email: String,
    result: Result<TokenResponse, RequestError>,
) -> bool {
    model.loading = false;
    match result {
        Ok(token) => {
            model.session.login(&token.access_token, &email);
            model.login_form = LoginForm::default();
            model.signup_form = SignupForm::default();
            ctx.link().send_message(Msg::Navigate(Route::Predict));
        }
        Err(e) => {
            log::error!("Authentication failed for {}: {}", email, e);
            model.error = Some(e.to_string());
        }
    }
    true
}

pub fn handle_test_login(model: &mut Model, ctx: &Context<Model>) -> bool {
    model.session.login_with_test_account();
    model.error = None;
    ctx.link().send_message(Msg::Navigate(Route::Predict));
    true
}

pub fn handle_logout(model: &mut Model, ctx: &Context<Model>) -> bool {
    model.submissions.cancel();
    model.session.logout();
    model.outcome = None;
    model.loading = false;
    ctx.link().send_message(Msg::Navigate(Route::Login));
    true
}

pub fn handle_submit_prediction(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.submissions.in_flight() {
        return false;
    }

    let ticket = model.submissions.begin();
    model.error = None;
    spawn_local({
        let session = model.session.session().clone();
        let builder = model.builder;
        let form = model.context_form.clone();
        let client = model.prediction_client.clone();
        let link = ctx.link().clone();

        async move {
            let outcome = submit_prediction(&session, &builder, &form, &client).await;
            link.send_message(Msg::PredictionFinished(ticket, outcome));
        }
    });
    true
}

pub fn handle_prediction_finished(
    model: &mut Model,
    ctx: &Context<Model>,
    ticket: SubmissionTicket,
    outcome: Result<PredictionOutcome, SubmitError>,
) -> bool {
    if !model.submissions.finish(ticket) {
        return false;
    }

    match outcome {
        Ok(outcome) => {
            model.error = outcome
                .view
                .anomaly
                .as_ref()
                .map(|anomaly| format!("Unexpected prediction format: {}", anomaly));
            model.outcome = Some(outcome);
        }
        Err(SubmitError::Unauthorized) => {
            model.outcome = None;
            ctx.link().send_message(Msg::Navigate(Route::Login));
        }
        Err(e) => {
            log::warn!("Prediction failed: {}", e);
            model.outcome = None;
            model.error = Some(e.to_string());
        }
    }
    true
}

pub fn handle_submit_project(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(token) = model.session.session().token().map(str::to_string) else {
        ctx.link().send_message(Msg::Navigate(Route::Login));
        return false;
    };
    let update = match model.project_form.to_update() {
        Ok(update) => update,
        Err(e) => {
            model.error = Some(e.to_string());
            return true;
        }
    };

    model.loading = true;
    model.error = None;
    model.notice = None;
    spawn_local({
        let client = model.auth_client.clone();
        let link = ctx.link().clone();

        async move {
            let result = client.update_project(&update, &token).await;
            link.send_message(Msg::ProjectFinished(result));
        }
    });
    true
}

pub fn handle_project_finished(model: &mut Model, result: Result<(), RequestError>) -> bool {
    model.loading = false;
    match result {
        Ok(()) => model.notice = Some("Project settings saved.".to_string()),
        Err(e) => model.error = Some(e.to_string()),
    }
    true
}
