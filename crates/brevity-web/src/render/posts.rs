//! Home, about, and post pages

use brevity_core::PostWithAuthor;
use brevity_service::{FormErrors, PostForm};
use maud::{html, Markup};

use super::fields;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn post_metadata(entry: &PostWithAuthor) -> Markup {
    html! {
        div.article-metadata {
            a.mr-2 href="#" { (entry.author.username) }
            small.text-muted { (entry.post.created_at.format(DATE_FORMAT).to_string()) }
        }
    }
}

/// All posts, oldest first
pub fn home_page(posts: &[PostWithAuthor]) -> Markup {
    html! {
        @for entry in posts {
            article.media.content-section {
                img.rounded-circle.article-img src=(entry.author.image_url()) alt="";
                div.media-body {
                    (post_metadata(entry))
                    h2 {
                        a.article-title href={ "/post/" (entry.post.id.into_inner()) } {
                            (entry.post.title)
                        }
                    }
                    p.article-content { (entry.post.content) }
                }
            }
        }
    }
}

pub fn about_page() -> Markup {
    html! {
        h1 { "About Page" }
    }
}

/// A single post; its author also gets the update and delete controls
pub fn post_page(entry: &PostWithAuthor, is_author: bool) -> Markup {
    let id = entry.post.id.into_inner();

    html! {
        article.media.content-section {
            img.rounded-circle.article-img src=(entry.author.image_url()) alt="";
            div.media-body {
                (post_metadata(entry))
                @if is_author {
                    div {
                        a.btn.btn-secondary.btn-sm.mt-1.mb-1 href={ "/post/" (id) "/update" } {
                            "Update"
                        }
                        form.d-inline method="POST" action={ "/post/" (id) "/delete" } {
                            input.btn.btn-danger.btn-sm.m-1 type="submit" value="Delete";
                        }
                    }
                }
                h2.article-title { (entry.post.title) }
                p.article-content { (entry.post.content) }
            }
        }
    }
}

/// Create or update form; `legend` is "New Post" or "Update Post"
pub fn post_form_page(legend: &str, action: &str, form: &PostForm, errors: &FormErrors) -> Markup {
    html! {
        div.content-section {
            form method="POST" action=(action) {
                fieldset.form-group {
                    legend.border-bottom.mb-4 { (legend) }
                    (fields::input("text", "title", "Title", Some(form.title.as_str()), errors))
                    (fields::textarea("content", "Content", &form.content, errors))
                }
                (fields::submit("Post"))
            }
        }
    }
}
