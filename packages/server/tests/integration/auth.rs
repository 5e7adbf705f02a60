use serde_json::json;

use crate::common::{ADMIN_PASSWORD, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn correct_password_sets_the_session_cookie() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json_raw(routes::LOGIN, &json!({"password": ADMIN_PASSWORD}))
            .await;

        assert_eq!(res.status().as_u16(), 200);

        let cookie = res
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .expect("login should set a cookie")
            .to_str()
            .unwrap()
            .to_string();
        assert!(
            cookie.starts_with("admin_session="),
            "unexpected cookie: {cookie}"
        );
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(
            !cookie.contains("Secure"),
            "Secure is off when secure_cookies is false: {cookie}"
        );

        let body: serde_json::Value = res.json().await.expect("login body should be JSON");
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(routes::LOGIN, &json!({"password": "a-guess"}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn empty_password_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post_json(routes::LOGIN, &json!({"password": ""})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Password must not be empty");
    }

    #[tokio::test]
    async fn missing_password_field_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post_json(routes::LOGIN, &json!({})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn probe_without_a_cookie_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::SESSION).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "SESSION_MISSING");
    }

    #[tokio::test]
    async fn probe_after_login_is_authenticated() {
        let app = TestApp::spawn().await;
        app.login().await;

        let res = app.get(routes::SESSION).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["authenticated"], true);
    }

    #[tokio::test]
    async fn garbage_cookie_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get_with_cookie(routes::SESSION, "admin_session=not-a-token")
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "SESSION_INVALID");
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let app = TestApp::spawn().await;
        let forged = server::utils::jwt::sign("some-other-secret", 24).unwrap();

        let res = app
            .get_with_cookie(routes::SESSION, &format!("admin_session={forged}"))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "SESSION_INVALID");
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn logout_clears_the_session() {
        let app = TestApp::spawn().await;
        app.login().await;
        assert_eq!(app.get(routes::SESSION).await.status, 200);

        let res = app.post_empty(routes::LOGOUT).await;
        assert_eq!(res.status, 204);

        let probe = app.get(routes::SESSION).await;
        assert_eq!(probe.status, 401);
        assert_eq!(probe.body["code"], "SESSION_MISSING");
    }

    #[tokio::test]
    async fn logout_without_a_session_succeeds() {
        let app = TestApp::spawn().await;

        let res = app.post_empty(routes::LOGOUT).await;

        assert_eq!(res.status, 204);
    }
}
