use super::super::{Model, Msg};
use super::utils::{on_submit, render_select, render_text_input};
use shared::{FormField, RuntimeEnv, ServiceType, TimeSlot};
use strum::IntoEnumIterator;
use yew::prelude::*;

fn field_input(
    model: &Model,
    ctx: &Context<Model>,
    id: &'static str,
    field: FormField,
    input_type: &'static str,
) -> Html {
    render_text_input(
        ctx.link(),
        id,
        field.label(),
        input_type,
        model.context_form.get(field),
        move |v| Msg::SetContextField(field, v),
    )
}

fn field_select(
    model: &Model,
    ctx: &Context<Model>,
    id: &'static str,
    field: FormField,
    options: Vec<(String, &'static str)>,
) -> Html {
    render_select(
        ctx.link(),
        id,
        field.label(),
        options,
        model.context_form.get(field),
        move |v| Msg::SetContextField(field, v),
    )
}

pub fn render_context_form(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let in_flight = model.submissions.in_flight();

    let service_types = ServiceType::iter().map(|t| (t.to_string(), t.label())).collect();
    let runtime_envs = RuntimeEnv::iter().map(|e| (e.to_string(), e.label())).collect();
    let time_slots = TimeSlot::iter().map(|s| (s.to_string(), s.label())).collect();

    html! {
        <section class="context-section">
            <h2><i class="fa-solid fa-sliders"></i>{" Prediction context"}</h2>
            <form class="context-form" onsubmit={on_submit(link, || Msg::SubmitPrediction)}>
                <div class="form-grid">
                    { field_input(model, ctx, "ctx-service-id", FormField::ServiceId, "text") }
                    { field_input(model, ctx, "ctx-metric", FormField::MetricName, "text") }
                    { field_input(model, ctx, "ctx-timestamp", FormField::Timestamp, "datetime-local") }
                    { field_select(model, ctx, "ctx-service-type", FormField::ServiceType, service_types) }
                    { field_select(model, ctx, "ctx-runtime-env", FormField::RuntimeEnv, runtime_envs) }
                    { field_select(model, ctx, "ctx-time-slot", FormField::TimeSlot, time_slots) }
                    { field_input(model, ctx, "ctx-weight", FormField::Weight, "number") }
                    { field_input(model, ctx, "ctx-users", FormField::ExpectedUsers, "number") }
                </div>
                <button type="submit" class="primary-button" disabled={in_flight}>
                    if in_flight {
                        <><i class="fa-solid fa-spinner fa-spin"></i>{" Predicting..."}</>
                    } else {
                        <><i class="fa-solid fa-bolt"></i>{" Predict"}</>
                    }
                </button>
            </form>
        </section>
    }
}
