use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

/// Bare error document, in the spirit of a framework default page
pub fn error_page(status: StatusCode, description: &str) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                title { (status.as_u16()) " " (reason) }
            }
            body {
                h1 { (reason) }
                p { (description) }
            }
        }
    }
}
