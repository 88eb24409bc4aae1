use super::super::{Model, Msg};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

pub fn input_value(e: &InputEvent) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

pub fn select_value(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

pub fn on_submit(link: &Scope<Model>, msg: fn() -> Msg) -> Callback<SubmitEvent> {
    link.callback(move |e: SubmitEvent| {
        e.prevent_default();
        msg()
    })
}

pub fn render_text_input<F>(
    link: &Scope<Model>,
    id: &'static str,
    label: &str,
    input_type: &'static str,
    value: &str,
    to_msg: F,
) -> Html
where
    F: Fn(String) -> Msg + 'static,
{
    html! {
        <label class="form-field">
            <span class="field-label">{ label }</span>
            <input
                id={id}
                type={input_type}
                value={value.to_string()}
                oninput={link.callback(move |e: InputEvent| to_msg(input_value(&e)))}
            />
        </label>
    }
}

/// `options` are `(wire value, label)` pairs.
pub fn render_select<F>(
    link: &Scope<Model>,
    id: &'static str,
    label: &str,
    options: Vec<(String, &'static str)>,
    selected: &str,
    to_msg: F,
) -> Html
where
    F: Fn(String) -> Msg + 'static,
{
    html! {
        <label class="form-field">
            <span class="field-label">{ label }</span>
            <select id={id} onchange={link.callback(move |e: Event| to_msg(select_value(&e)))}>
                { for options.into_iter().map(|(value, text)| {
                    let is_selected = value == selected;
                    html! { <option value={value} selected={is_selected}>{ text }</option> }
                })}
            </select>
        </label>
    }
}

pub fn render_error_message(model: &Model) -> Html {
    match (&model.error, &model.notice) {
        (Some(error_msg), _) => html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        },
        (None, Some(notice)) => html! {
            <div class="notice-message">
                <i class="fa-solid fa-circle-check"></i>
                <p>{ notice }</p>
            </div>
        },
        (None, None) => html! {},
    }
}
