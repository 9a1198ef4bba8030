//! End-to-end flows through the app shell against a mock backend.

use std::time::Duration;

use egui::{OpenUrl, OutputCommand};
use kittest::Queryable as _;
use loanpay_business::{Navigation, Role, Route, UserProfile};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestCtx;

mod common;

#[tokio::test]
async fn test_signed_out_app_starts_on_login() {
    let mut ctx = TestCtx::new_app().await;
    ctx.harness_mut().step();

    assert_eq!(ctx.state().history.current(), Route::Login);
    assert!(
        ctx.harness_mut()
            .query_by_label("You are signed out.")
            .is_some(),
        "login page should be shown"
    );
}

#[tokio::test]
async fn test_signed_in_app_starts_on_home() {
    let mut ctx = TestCtx::new_app_with_role("borrower").await;
    ctx.harness_mut().step();

    assert_eq!(ctx.state().history.current(), Route::Root);
    assert!(
        ctx.harness_mut()
            .query_by_label("Welcome, Ada Lovelace")
            .is_some(),
        "home page should greet the user"
    );
}

#[tokio::test]
async fn test_payment_opens_checkout() {
    let mut ctx = TestCtx::new_app_with_role("borrower").await;

    Mock::given(method("POST"))
        .and(path("/api/payment/initialize"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "checkout_url": "https://pay.example/abc" })),
        )
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    {
        let state = ctx.harness_mut().state_mut().state_mut();
        state.history.navigate(Navigation::push(Route::Payments));
        state.payment_form.amount = "250".to_owned();
    }
    ctx.harness_mut().step();

    ctx.harness_mut().get_by_label("Pay Now").click();
    ctx.harness_mut().step();
    assert!(ctx.state().payment_form.loading, "submit should start loading");

    ctx.step_until(|state| !state.payment_form.loading).await;

    let form = &ctx.state().payment_form;
    assert_eq!(form.checkout_url.as_deref(), Some("https://pay.example/abc"));
    assert!(form.error.is_none());

    let commands = &ctx.harness_mut().output().platform_output.commands;
    assert!(
        commands.contains(&OutputCommand::OpenUrl(OpenUrl::new_tab(
            "https://pay.example/abc"
        ))),
        "checkout should open in a new tab, got {commands:?}"
    );
}

#[tokio::test]
async fn test_payment_failure_shows_server_message() {
    let mut ctx = TestCtx::new_app_with_role("borrower").await;

    Mock::given(method("POST"))
        .and(path("/api/payment/initialize"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({ "message": "insufficient funds" })),
        )
        .mount(&ctx.mock_server)
        .await;

    {
        let state = ctx.harness_mut().state_mut().state_mut();
        state.history.navigate(Navigation::push(Route::Payments));
        state.payment_form.amount = "9000".to_owned();
    }
    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Pay Now").click();
    ctx.harness_mut().step();

    ctx.step_until(|state| !state.payment_form.loading).await;
    ctx.harness_mut().step();

    assert_eq!(
        ctx.state().payment_form.error.as_deref(),
        Some("insufficient funds")
    );
    assert!(
        ctx.harness_mut()
            .query_by_label("insufficient funds")
            .is_some(),
        "error should be shown inline"
    );
}

#[tokio::test]
async fn test_logout_clears_session_even_on_server_error() {
    let mut ctx = TestCtx::new_app_with_role("borrower").await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("⎋").click();
    ctx.harness_mut().step();

    ctx.step_until(|state| state.history.current() == Route::Login)
        .await;

    let state = ctx.state();
    assert!(state.session.token().is_none());
    assert!(state.session.user().is_none());
    assert!(!state.logout_button.in_flight);
}

#[tokio::test]
async fn test_borrower_is_turned_away_from_admin() {
    let mut ctx = TestCtx::new_app_with_role("borrower").await;

    ctx.harness_mut()
        .state_mut()
        .state_mut()
        .history
        .navigate(Navigation::push(Route::Admin));
    ctx.harness_mut().step();
    // The redirect lands on the frame after the guard fires.
    ctx.harness_mut().step();

    assert_eq!(ctx.state().history.current(), Route::Root);
    assert!(
        ctx.harness_mut().query_by_label("Admin").is_some(),
        "home navigation should be visible again"
    );
}

#[tokio::test]
async fn test_admin_sees_admin_page() {
    let mut ctx = TestCtx::new_app_with_role("admin").await;

    ctx.harness_mut()
        .state_mut()
        .state_mut()
        .history
        .navigate(Navigation::push(Route::Admin));
    ctx.harness_mut().step();

    assert_eq!(ctx.state().history.current(), Route::Admin);
    assert!(
        ctx.harness_mut()
            .query_by_label("ada@example.com")
            .is_some(),
        "admin page should list the session profile"
    );
}

#[tokio::test]
async fn test_next_user_starts_with_a_clean_payment_form() {
    let mut ctx = TestCtx::new_app_with_role("borrower").await;

    Mock::given(method("POST"))
        .and(path("/api/payment/initialize"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({ "message": "insufficient funds" })),
        )
        .mount(&ctx.mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.mock_server)
        .await;

    {
        let state = ctx.harness_mut().state_mut().state_mut();
        state.history.navigate(Navigation::push(Route::Payments));
        state.payment_form.amount = "9000".to_owned();
    }
    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Pay Now").click();
    ctx.harness_mut().step();
    ctx.step_until(|state| state.payment_form.error.is_some())
        .await;

    ctx.harness_mut().get_by_label("⎋").click();
    ctx.harness_mut().step();
    ctx.step_until(|state| state.history.current() == Route::Login)
        .await;

    let bob = UserProfile {
        email: Some("bob@example.com".to_owned()),
        name: Some("Bob Stone".to_owned()),
        phone_number: None,
        role: Some(Role::new("borrower")),
    };
    ctx.state()
        .session
        .sign_in("bob-token", &bob)
        .expect("sign in should succeed");
    ctx.harness_mut()
        .state_mut()
        .state_mut()
        .history
        .navigate(Navigation::push(Route::Payments));
    ctx.harness_mut().step();

    let form = &ctx.state().payment_form;
    assert!(form.amount.is_empty());
    assert!(form.error.is_none());
    assert!(form.checkout_url.is_none());
    assert!(
        ctx.harness_mut()
            .query_by_label("insufficient funds")
            .is_none(),
        "previous user's error should be gone"
    );
}

#[tokio::test]
async fn test_payment_finishing_after_logout_is_dropped() {
    let mut ctx = TestCtx::new_app_with_role("borrower").await;

    Mock::given(method("POST"))
        .and(path("/api/payment/initialize"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "checkout_url": "https://pay.example/late" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&ctx.mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.mock_server)
        .await;

    {
        let state = ctx.harness_mut().state_mut().state_mut();
        state.history.navigate(Navigation::push(Route::Payments));
        state.payment_form.amount = "250".to_owned();
    }
    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Pay Now").click();
    ctx.harness_mut().step();
    assert!(ctx.state().payment_form.loading);

    ctx.harness_mut().get_by_label("⎋").click();
    ctx.harness_mut().step();
    ctx.step_until(|state| state.history.current() == Route::Login)
        .await;
    assert!(!ctx.state().payment_form.loading);

    // Give the delayed payment response time to land.
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(150)).await;
        ctx.harness_mut().step();
        let commands = &ctx.harness_mut().output().platform_output.commands;
        assert!(
            !commands
                .iter()
                .any(|command| matches!(command, OutputCommand::OpenUrl(_))),
            "no checkout should open after logout, got {commands:?}"
        );
    }

    let form = &ctx.state().payment_form;
    assert!(form.checkout_url.is_none());
    assert!(!form.loading);
    assert_eq!(ctx.state().history.current(), Route::Login);
}
