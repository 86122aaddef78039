//! End-to-end tests against a spawned server
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test web_tests

use integration_tests::{
    assert_json, assert_page, assert_redirect, assert_status, check_test_env, find_post_id,
    location, post_form, TestServer, TestUser,
};
use reqwest::{multipart, StatusCode};

const BAD_LOGIN: &str = "Login Unsuccessful. Please check email and password";

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    let response = browser.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    let response = browser.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_then_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let user = TestUser::unique();

    let response = browser.register(&user).await.unwrap();
    assert_redirect(response, "/login").await.unwrap();

    // The flash shows once on the next page
    let page = assert_page(browser.get("/login").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(page.contains("Your account has been created! You are now able to log in"));
    let page = assert_page(browser.get("/login").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(!page.contains("Your account has been created!"));

    let response = browser.login(&user).await.unwrap();
    assert!(response
        .headers()
        .get_all("set-cookie")
        .iter()
        .any(|v| v.to_str().unwrap_or_default().starts_with("session=")));
    assert_redirect(response, "/home").await.unwrap();

    let page = assert_page(browser.get("/account").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(page.contains(&user.username));
    assert!(page.contains("/static/profile_pics/default.jpg"));

    // Logged-in users are sent away from the login form
    assert_redirect(browser.get("/login").await.unwrap(), "/home")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::unique();
    assert_redirect(server.browser().unwrap().register(&user).await.unwrap(), "/login")
        .await
        .unwrap();

    let copycat = TestUser {
        email: user.email.clone(),
        ..TestUser::unique()
    };
    let response = server.browser().unwrap().register(&copycat).await.unwrap();
    let page = assert_page(response, StatusCode::OK).await.unwrap();
    assert!(page.contains("That email is taken. Please choose a different one."));
    assert!(!page.contains(&copycat.password));
}

#[tokio::test]
async fn test_register_validation_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    let response = browser
        .post_form(
            "/register",
            &[
                ("username", "a"),
                ("email", "not-an-email"),
                ("password", "secret1"),
                ("confirm_password", "secret2"),
            ],
        )
        .await
        .unwrap();
    let page = assert_page(response, StatusCode::OK).await.unwrap();
    assert!(page.contains("Field must be between 2 and 20 characters long."));
    assert!(page.contains("Invalid email address."));
    assert!(page.contains("Field must be equal to password."));
}

#[tokio::test]
async fn test_register_overlong_email_rerenders_form() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let user = TestUser::unique();
    let email = format!("{}@{}.{}.example.com", "a".repeat(60), "b".repeat(40), "c".repeat(20));

    let response = browser
        .post_form(
            "/register",
            &[
                ("username", user.username.as_str()),
                ("email", email.as_str()),
                ("password", user.password.as_str()),
                ("confirm_password", user.password.as_str()),
            ],
        )
        .await
        .unwrap();
    let page = assert_page(response, StatusCode::OK).await.unwrap();
    assert!(page.contains("Field cannot be longer than 120 characters."));
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::unique();
    let browser = server.browser().unwrap();
    assert_redirect(browser.register(&user).await.unwrap(), "/login")
        .await
        .unwrap();

    let wrong_password = TestUser {
        password: "wrong-password".to_string(),
        ..user.clone()
    };
    let response = browser.login(&wrong_password).await.unwrap();
    let with_bad_password = assert_page(response, StatusCode::OK).await.unwrap();
    assert!(with_bad_password.contains(BAD_LOGIN));

    let response = browser.login(&TestUser::unique()).await.unwrap();
    let with_unknown_email = assert_page(response, StatusCode::OK).await.unwrap();
    assert!(with_unknown_email.contains(BAD_LOGIN));

    // Still anonymous
    let response = browser.get("/account").await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_required_redirect_and_next() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    let user = TestUser::unique();
    assert_redirect(browser.register(&user).await.unwrap(), "/login")
        .await
        .unwrap();

    let response = browser.get("/post/new").await.unwrap();
    assert_redirect(response, "/login?next=%2Fpost%2Fnew")
        .await
        .unwrap();

    let page = assert_page(
        browser.get("/login?next=%2Fpost%2Fnew").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(page.contains("Please log in to access this page."));

    let response = browser
        .post_form("/login?next=%2Fpost%2Fnew", &user.login_form())
        .await
        .unwrap();
    assert_redirect(response, "/post/new").await.unwrap();
}

#[tokio::test]
async fn test_logout() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser.sign_up(&TestUser::unique()).await.unwrap();

    assert_status(browser.get("/account").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_redirect(browser.get("/logout").await.unwrap(), "/home")
        .await
        .unwrap();

    let response = browser.get("/account").await.unwrap();
    assert_eq!(location(&response).as_deref(), Some("/login?next=%2Faccount"));
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_records_author() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = TestUser::unique();
    let browser = server.browser().unwrap();
    browser.sign_up(&alice).await.unwrap();

    let form = post_form("Hi");
    let title = form[0].1.clone();
    let response = browser.post_form("/post/new", &form).await.unwrap();
    assert_redirect(response, "/home").await.unwrap();

    let home = assert_page(browser.get("/home").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(home.contains("Your post has been created!"));
    let post_id = find_post_id(&home, &title).unwrap();

    let page = assert_page(
        browser.get(&format!("/post/{post_id}")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(page.contains(&title));
    assert!(page.contains(&alice.username));
    assert!(page.contains(&format!("/post/{post_id}/delete")));
}

#[tokio::test]
async fn test_non_author_is_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.browser().unwrap();
    alice.sign_up(&TestUser::unique()).await.unwrap();
    let bob = server.browser().unwrap();
    bob.sign_up(&TestUser::unique()).await.unwrap();

    let form = post_form("Hi");
    let title = form[0].1.clone();
    assert_redirect(alice.post_form("/post/new", &form).await.unwrap(), "/home")
        .await
        .unwrap();
    let home = assert_page(alice.get("/home").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let post_id = find_post_id(&home, &title).unwrap();

    // Bob sees the post without the author controls
    let page = assert_page(
        bob.get(&format!("/post/{post_id}")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(!page.contains(&format!("/post/{post_id}/delete")));

    let response = bob
        .post_form(&format!("/post/{post_id}/delete"), &[("confirm", "1")])
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = bob
        .post_form(
            &format!("/post/{post_id}/update"),
            &[("title", "Hijacked"), ("content", "Nope")],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = bob.get(&format!("/post/{post_id}/update")).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let page = assert_page(
        alice.get(&format!("/post/{post_id}")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(page.contains(&title));
    assert!(!page.contains("Hijacked"));
}

#[tokio::test]
async fn test_author_updates_and_deletes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser.sign_up(&TestUser::unique()).await.unwrap();

    let form = post_form("Draft");
    let title = form[0].1.clone();
    assert_redirect(browser.post_form("/post/new", &form).await.unwrap(), "/home")
        .await
        .unwrap();
    let home = assert_page(browser.get("/home").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let post_id = find_post_id(&home, &title).unwrap();

    let edit = assert_page(
        browser.get(&format!("/post/{post_id}/update")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(edit.contains("Update Post"));
    assert!(edit.contains(&title));

    let new_title = format!("{title} v2");
    let response = browser
        .post_form(
            &format!("/post/{post_id}/update"),
            &[("title", new_title.as_str()), ("content", "Edited")],
        )
        .await
        .unwrap();
    assert_redirect(response, &format!("/post/{post_id}"))
        .await
        .unwrap();

    let page = assert_page(
        browser.get(&format!("/post/{post_id}")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(page.contains("Your post has been updated!"));
    assert!(page.contains(&new_title));
    assert!(page.contains("Edited"));

    let response = browser
        .post_form(&format!("/post/{post_id}/delete"), &[("confirm", "1")])
        .await
        .unwrap();
    assert_redirect(response, "/home").await.unwrap();

    let response = browser.get(&format!("/post/{post_id}")).await.unwrap();
    let page = assert_page(response, StatusCode::NOT_FOUND).await.unwrap();
    assert!(page.contains(&format!("There is no post with post id: {post_id}")));
}

#[tokio::test]
async fn test_empty_post_rerenders_form() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();
    browser.sign_up(&TestUser::unique()).await.unwrap();

    let response = browser
        .post_form("/post/new", &[("title", ""), ("content", "")])
        .await
        .unwrap();
    let page = assert_page(response, StatusCode::OK).await.unwrap();
    assert!(page.contains("This field is required."));
    assert!(page.contains("New Post"));
}

#[tokio::test]
async fn test_unknown_post_ids() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let browser = server.browser().unwrap();

    assert_status(browser.get("/post/abc").await.unwrap(), StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_status(browser.get("/post/-1").await.unwrap(), StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_status(browser.get("/no/such/page").await.unwrap(), StatusCode::NOT_FOUND)
        .await
        .unwrap();
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_account_rejects_unapproved_extension() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::unique();
    let browser = server.browser().unwrap();
    browser.sign_up(&user).await.unwrap();

    let picture = multipart::Part::bytes(b"GIF89a".to_vec())
        .file_name("avatar.gif")
        .mime_str("image/gif")
        .unwrap();
    let form = multipart::Form::new()
        .text("username", user.username.clone())
        .text("email", user.email.clone())
        .part("picture", picture);

    let response = browser.post_multipart("/account", form).await.unwrap();
    let page = assert_page(response, StatusCode::OK).await.unwrap();
    assert!(page.contains("File does not have an approved extension: jpg, png"));
}

#[tokio::test]
async fn test_account_update_without_picture() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = TestUser::unique();
    let browser = server.browser().unwrap();
    browser.sign_up(&user).await.unwrap();

    let renamed = TestUser::unique();
    let form = multipart::Form::new()
        .text("username", renamed.username.clone())
        .text("email", user.email.clone());

    let response = browser.post_multipart("/account", form).await.unwrap();
    assert_redirect(response, "/account").await.unwrap();

    let page = assert_page(browser.get("/account").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(page.contains("Your account has been updated!"));
    assert!(page.contains(&renamed.username));
    assert!(page.contains("/static/profile_pics/default.jpg"));
}
