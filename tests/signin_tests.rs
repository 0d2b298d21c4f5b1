//! Sign-in and sign-up flow tests
//!
//! Run with: cargo test --test signin_tests

mod common;

use common::MockBackend;
use storefront::auth::{self, MemoryStorage, Role, SignUpForm};
use storefront::routes::Destination;

fn form(user_name: &str) -> SignUpForm {
    SignUpForm {
        first_name: "Jane".into(),
        last_name: "Perera".into(),
        user_name: user_name.into(),
        email: "jane@example.com".into(),
        password: "janepass".into(),
        confirm_password: "janepass".into(),
    }
}

#[tokio::test]
async fn test_admin_lands_on_admin_page() {
    let backend = MockBackend::start().await;
    let storage = MemoryStorage::new();
    let ctx = backend.context(storage.clone());

    let landing = auth::sign_in(&ctx.api, &ctx.session, "admin", "adminpass")
        .await
        .unwrap();

    assert_eq!(landing, Destination::Admin);
    assert_eq!(ctx.session.current_session().role(), Some(Role::Admin));
    assert_eq!(ctx.navigator.navigate(landing.path()).rendered, Destination::Admin);
    assert_eq!(storage.len(), 2);
}

#[tokio::test]
async fn test_customer_lands_on_home() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(MemoryStorage::new());

    let landing = auth::sign_in(&ctx.api, &ctx.session, "jane", "janepass")
        .await
        .unwrap();

    assert_eq!(landing, Destination::Home);
    assert_eq!(ctx.session.current_session().role(), Some(Role::Customer));
}

#[tokio::test]
async fn test_empty_credentials_rejected_locally() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(MemoryStorage::new());

    let err = auth::sign_in(&ctx.api, &ctx.session, "  ", "x").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn test_unreachable_server_message() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut config = storefront::Config::default();
    config.api.base_url = format!("http://127.0.0.1:{}/api", port);
    let ctx = storefront::AppContext::with_storage(config, MemoryStorage::new()).unwrap();

    let err = auth::sign_in(&ctx.api, &ctx.session, "admin", "adminpass")
        .await
        .unwrap_err();
    assert_eq!(
        auth::signin::describe_error(&err),
        "No response from server. Please try again later."
    );
}

#[tokio::test]
async fn test_sign_up_registers_customer() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(MemoryStorage::new());

    let next = auth::sign_up(&ctx.api, &form("nimal")).await.unwrap();

    assert_eq!(next, Destination::SignIn);
    let registered = backend.registered();
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0]["user_name"], "nimal");
    assert_eq!(registered[0]["role"], "customer");
    assert!(registered[0].get("confirm_password").is_none());
    // registering does not sign anyone in
    assert!(!ctx.session.current_session().is_authenticated());
}

#[tokio::test]
async fn test_sign_up_password_mismatch_stays_local() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(MemoryStorage::new());
    let mut mismatched = form("nimal");
    mismatched.confirm_password = "different".into();

    let err = auth::sign_up(&ctx.api, &mismatched).await.unwrap_err();

    assert_eq!(auth::signup::describe_error(&err), "Passwords do not match");
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn test_sign_up_surfaces_server_message() {
    let backend = MockBackend::start().await;
    let ctx = backend.context(MemoryStorage::new());

    let err = auth::sign_up(&ctx.api, &form("admin")).await.unwrap_err();
    assert_eq!(auth::signup::describe_error(&err), "Username already exists");
}
