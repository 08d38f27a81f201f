//! Session lifecycle integration tests
//!
//! Register, login, refresh rotation, logout, and bearer authentication
//! through the composed router.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use crate::common::{fixtures, json_request, TestApp};

mod test_register {
    use super::*;

    #[tokio::test]
    async fn test_register_customer_then_me() {
        let app = TestApp::new();

        let registered = app.register(fixtures::customer("a@x.com")).await;
        assert_eq!(registered.status, StatusCode::OK);
        assert_eq!(registered.body["token_type"], "bearer");
        assert_eq!(registered.body["user_type"], "customer");
        assert!(registered.body.get("refresh_token").is_none());

        let cookie = registered.set_cookie.as_deref().unwrap();
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!registered.refresh_token().unwrap().is_empty());

        let me = app
            .get_with_bearer("/auth/me", &registered.access_token())
            .await;
        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.body, json!({ "email": "a@x.com", "user_type": "customer" }));
    }

    #[tokio::test]
    async fn test_register_restaurant() {
        let app = TestApp::new();

        let registered = app
            .register(fixtures::restaurant("owner@bistro.com", "Bistro"))
            .await;
        assert_eq!(registered.status, StatusCode::OK);
        assert_eq!(registered.body["user_type"], "restaurant");
    }

    #[tokio::test]
    async fn test_duplicate_customer_rejected() {
        let app = TestApp::new();
        app.register(fixtures::customer("a@x.com")).await;

        let again = app.register(fixtures::customer("a@x.com")).await;
        assert_eq!(again.status, StatusCode::CONFLICT);
        assert_eq!(again.error_message(), "Customer already exists");
        assert!(again.set_cookie.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_customer_reported_before_missing_names() {
        let app = TestApp::new();
        app.register(fixtures::customer("a@x.com")).await;

        let again = app
            .register(json!({
                "email": "a@x.com",
                "password": "pw",
                "user_type": "customer",
            }))
            .await;
        assert_eq!(again.status, StatusCode::CONFLICT);
        assert_eq!(again.error_message(), "Customer already exists");
    }

    #[tokio::test]
    async fn test_missing_restaurant_name_reported_before_duplicate_email() {
        let app = TestApp::new();
        app.register(fixtures::restaurant("owner@bistro.com", "Bistro"))
            .await;

        let again = app
            .register(json!({
                "email": "owner@bistro.com",
                "password": "pw",
                "user_type": "restaurant",
            }))
            .await;
        assert_eq!(again.status, StatusCode::BAD_REQUEST);
        assert_eq!(again.error_message(), "name required for restaurant");
    }

    #[tokio::test]
    async fn test_duplicate_restaurant_email_and_name_rejected() {
        let app = TestApp::new();
        app.register(fixtures::restaurant("owner@bistro.com", "Bistro"))
            .await;

        let same_email = app
            .register(fixtures::restaurant("owner@bistro.com", "Other"))
            .await;
        assert_eq!(same_email.status, StatusCode::CONFLICT);
        assert_eq!(same_email.error_message(), "Restaurant email already exists");

        let same_name = app
            .register(fixtures::restaurant("chef@elsewhere.com", "Bistro"))
            .await;
        assert_eq!(same_name.status, StatusCode::CONFLICT);
        assert_eq!(same_name.error_message(), "Restaurant name already exists");
    }

    #[tokio::test]
    async fn test_missing_role_fields_rejected() {
        let app = TestApp::new();

        let customer = app
            .register(json!({
                "email": "a@x.com",
                "password": "pw",
                "user_type": "customer",
                "first_name": "Ann",
            }))
            .await;
        assert_eq!(customer.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            customer.error_message(),
            "first_name and surname required for customer"
        );

        let restaurant = app
            .register(json!({
                "email": "owner@bistro.com",
                "password": "pw",
                "user_type": "restaurant",
            }))
            .await;
        assert_eq!(restaurant.status, StatusCode::BAD_REQUEST);
        assert_eq!(restaurant.error_message(), "name required for restaurant");
    }

    #[tokio::test]
    async fn test_malformed_payloads_rejected() {
        let app = TestApp::new();

        let response = app.register(fixtures::customer("not-an-email")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "VALIDATION_ERROR");

        let mut empty_password = fixtures::customer("a@x.com");
        empty_password["password"] = json!("");
        let response = app.register(empty_password).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let mut unknown_role = fixtures::customer("a@x.com");
        unknown_role["user_type"] = json!("admin");
        let response = app.register(unknown_role).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }
}

mod test_login {
    use super::*;

    #[tokio::test]
    async fn test_login_issues_session() {
        let app = TestApp::new();
        app.register(fixtures::customer("a@x.com")).await;

        let login = app.login("a@x.com", "pw", "customer").await;
        assert_eq!(login.status, StatusCode::OK);
        assert_eq!(login.body["user_type"], "customer");
        assert!(login.refresh_token().is_some());

        let me = app.get_with_bearer("/auth/me", &login.access_token()).await;
        assert_eq!(me.body["email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_wrong_password_indistinguishable_from_unknown_user() {
        let app = TestApp::new();
        app.register(fixtures::customer("a@x.com")).await;

        let wrong_password = app.login("a@x.com", "nope", "customer").await;
        let unknown_user = app.login("b@x.com", "pw", "customer").await;

        assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.status, unknown_user.status);
        assert_eq!(wrong_password.body, unknown_user.body);
        assert_eq!(wrong_password.error_message(), "Invalid credentials");
        assert!(wrong_password.set_cookie.is_none());
    }

    #[tokio::test]
    async fn test_login_is_scoped_to_role() {
        let app = TestApp::new();
        app.register(fixtures::customer("a@x.com")).await;

        let as_restaurant = app.login("a@x.com", "pw", "restaurant").await;
        assert_eq!(as_restaurant.status, StatusCode::UNAUTHORIZED);
        assert_eq!(as_restaurant.error_message(), "Invalid credentials");
    }
}

mod test_refresh {
    use super::*;

    #[tokio::test]
    async fn test_refresh_rotates_twice() {
        let app = TestApp::new();
        let login = app.register(fixtures::customer("a@x.com")).await;
        let first = login.refresh_token().unwrap();

        let rotated = app.refresh(Some(&first)).await;
        assert_eq!(rotated.status, StatusCode::OK);
        assert_eq!(rotated.body["token_type"], "bearer");
        assert_eq!(rotated.body["user_type"], "customer");
        let second = rotated.refresh_token().unwrap();
        assert_ne!(second, first);

        let rotated_again = app.refresh(Some(&second)).await;
        assert_eq!(rotated_again.status, StatusCode::OK);
        let third = rotated_again.refresh_token().unwrap();
        assert_ne!(third, second);

        let me = app
            .get_with_bearer("/auth/me", &rotated_again.access_token())
            .await;
        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.body["email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_refresh_without_cookie_rejected() {
        let app = TestApp::new();

        let response = app.refresh(None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(response.set_cookie.is_none());
    }

    #[tokio::test]
    async fn test_access_token_cannot_refresh() {
        let app = TestApp::new();
        let login = app.register(fixtures::customer("a@x.com")).await;

        let response = app.refresh(Some(&login.access_token())).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.error_message(), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_garbage_cookie_rejected() {
        let app = TestApp::new();

        let response = app.refresh(Some("not.a.token")).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}

mod test_bearer {
    use super::*;

    #[tokio::test]
    async fn test_refresh_token_cannot_authenticate() {
        let app = TestApp::new();
        let login = app.register(fixtures::customer("a@x.com")).await;

        let me = app
            .get_with_bearer("/auth/me", &login.refresh_token().unwrap())
            .await;
        assert_eq!(me.status, StatusCode::UNAUTHORIZED);
        assert_eq!(me.error_message(), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_authorization() {
        let app = TestApp::new();

        let missing = app
            .send(
                Request::builder()
                    .uri("/auth/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

        let malformed = app
            .send(
                Request::builder()
                    .uri("/auth/me")
                    .header(header::AUTHORIZATION, "Token abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(malformed.status, StatusCode::UNAUTHORIZED);
    }
}

mod test_logout {
    use super::*;

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let app = TestApp::new();
        let login = app.register(fixtures::customer("a@x.com")).await;
        let token = login.refresh_token().unwrap();

        let response = app
            .send(
                Request::builder()
                    .method(Method::POST)
                    .uri("/auth/logout")
                    .header(header::COOKIE, format!("rb_refresh={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "status": "ok" }));
        assert_eq!(response.refresh_token().as_deref(), Some(""));
        assert!(response.set_cookie.as_deref().unwrap().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_logout_without_session_still_clears() {
        let app = TestApp::new();

        let response = app
            .send(json_request(Method::POST, "/auth/logout", json!({})))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.refresh_token().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_refresh_token_survives_logout_until_expiry() {
        let app = TestApp::new();
        let login = app.register(fixtures::customer("a@x.com")).await;
        let token = login.refresh_token().unwrap();

        app.send(json_request(Method::POST, "/auth/logout", json!({})))
            .await;

        // No server-side revocation: only the client discards the cookie
        let rotated = app.refresh(Some(&token)).await;
        assert_eq!(rotated.status, StatusCode::OK);
    }
}
