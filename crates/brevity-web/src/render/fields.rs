//! Form field helpers
//!
//! Fields with errors get the `is-invalid` class and list their messages
//! below the input.

use brevity_service::FormErrors;
use maud::{html, Markup};

fn feedback(messages: &[String]) -> Markup {
    html! {
        @if !messages.is_empty() {
            div.invalid-feedback {
                @for message in messages {
                    span { (message) }
                }
            }
        }
    }
}

/// Single-line input; `value` is `None` for fields that are never echoed back
pub(super) fn input(
    kind: &str,
    name: &str,
    label: &str,
    value: Option<&str>,
    errors: &FormErrors,
) -> Markup {
    let messages = errors.get(name);

    html! {
        div.form-group {
            label.form-control-label for=(name) { (label) }
            input.form-control.form-control-lg.is-invalid[!messages.is_empty()]
                type=(kind) id=(name) name=(name) value=[value];
            (feedback(messages))
        }
    }
}

pub(super) fn textarea(name: &str, label: &str, value: &str, errors: &FormErrors) -> Markup {
    let messages = errors.get(name);

    html! {
        div.form-group {
            label.form-control-label for=(name) { (label) }
            textarea.form-control.form-control-lg.is-invalid[!messages.is_empty()]
                id=(name) name=(name) { (value) }
            (feedback(messages))
        }
    }
}

pub(super) fn file(name: &str, label: &str, accept: &str, errors: &FormErrors) -> Markup {
    let messages = errors.get(name);

    html! {
        div.form-group {
            label for=(name) { (label) }
            input.form-control-file type="file" id=(name) name=(name) accept=(accept);
            @for message in messages {
                span.text-danger { (message) }
                br;
            }
        }
    }
}

pub(super) fn checkbox(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        div.form-check {
            input.form-check-input type="checkbox" id=(name) name=(name) checked[checked];
            label.form-check-label for=(name) { (label) }
        }
    }
}

pub(super) fn submit(label: &str) -> Markup {
    html! {
        div.form-group {
            input.btn.btn-outline-info type="submit" value=(label);
        }
    }
}
