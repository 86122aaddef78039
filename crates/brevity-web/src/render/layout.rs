//! Shared page chrome

use maud::{html, Markup, DOCTYPE};

use crate::extractors::Flash;

/// Wrap `content` in the site layout
///
/// The navigation bar switches between "Login / Register" and
/// "New Post / Account / Logout" depending on `signed_in`.
pub fn layout(
    app_name: &str,
    title: Option<&str>,
    signed_in: bool,
    flashes: &[Flash],
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no";
                link rel="stylesheet" type="text/css" href="/static/main.css";
                title {
                    @match title {
                        Some(title) => { (app_name) " - " (title) }
                        None => { (app_name) }
                    }
                }
            }
            body {
                header.site-header {
                    nav.navbar.navbar-expand-md.navbar-dark.bg-steel.fixed-top {
                        div.container {
                            a.navbar-brand.mr-4 href="/" { (app_name) }
                            div.navbar-nav.mr-auto {
                                a.nav-item.nav-link href="/home" { "Home" }
                                a.nav-item.nav-link href="/about" { "About" }
                            }
                            div.navbar-nav {
                                @if signed_in {
                                    a.nav-item.nav-link href="/post/new" { "New Post" }
                                    a.nav-item.nav-link href="/account" { "Account" }
                                    a.nav-item.nav-link href="/logout" { "Logout" }
                                } @else {
                                    a.nav-item.nav-link href="/login" { "Login" }
                                    a.nav-item.nav-link href="/register" { "Register" }
                                }
                            }
                        }
                    }
                }
                main.container role="main" {
                    div.row {
                        div.col-md-8 {
                            @for flash in flashes {
                                div class={ "alert alert-" (flash.category.as_str()) } {
                                    (flash.message)
                                }
                            }
                            (content)
                        }
                        div.col-md-4 {
                            div.content-section {
                                h3 { "Our Sidebar" }
                                p.text-muted { "You can put any information here you'd like." }
                            }
                        }
                    }
                }
            }
        }
    }
}
