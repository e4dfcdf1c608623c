//! Authentication integration tests
//!
//! Bearer and refresh-token handling as seen through real HTTP requests.

use axum::http::{Method, StatusCode};
use serde_json::Value;
use storefront_auth::AuthConfig;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{create_test_jwt, json_request, parse_body, request, TestApp, TestConfig};

const SESSION: &str = "/v1/auth/session";
const REFRESH: &str = "/v1/auth/refresh";
const RESET_PASSWORD: &str = "/v1/auth/reset_password";

mod test_session {
    use super::*;

    #[tokio::test]
    async fn test_valid_token_returns_claims() {
        let app = TestApp::new().unwrap();
        let bearer = format!("Bearer {}", app.jwt());

        let resp = app
            .test_router()
            .oneshot(request(
                Method::GET,
                SESSION,
                &[("authorization", bearer.as_str())],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["aud"], "authenticated");
        assert_eq!(body["role"], "authenticated");

        let now = chrono::Utc::now().timestamp();
        assert!(body["iat"].as_i64().unwrap() <= now);
        assert!(body["exp"].as_i64().unwrap() > now);
        assert!(body["expires_in"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_lowercase_scheme_accepted() {
        let app = TestApp::new().unwrap();
        let bearer = format!("bearer {}", app.jwt());

        let resp = app
            .test_router()
            .oneshot(request(
                Method::GET,
                SESSION,
                &[("authorization", bearer.as_str())],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }
}

mod test_rejections {
    use super::*;

    async fn session_with(app: &TestApp, authorization: Option<&str>) -> (StatusCode, Value) {
        let headers: Vec<(&str, &str)> = authorization
            .map(|value| vec![("authorization", value)])
            .unwrap_or_default();

        let resp = app
            .test_router()
            .oneshot(request(Method::GET, SESSION, &headers))
            .await
            .unwrap();

        let status = resp.status();
        (status, parse_body(resp).await)
    }

    #[tokio::test]
    async fn test_missing_authorization_header() {
        let app = TestApp::new().unwrap();

        let (status, body) = session_with(&app, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_invalid_authorization_format() {
        let app = TestApp::new().unwrap();

        let (status, body) = session_with(&app, Some("InvalidFormat token123")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_malformed_jwt() {
        let app = TestApp::new().unwrap();

        let (status, body) = session_with(&app, Some("Bearer invalid.jwt.token")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid token: "));
    }

    #[tokio::test]
    async fn test_foreign_signature() {
        let app = TestApp::new().unwrap();
        let token = create_test_jwt("invalid-signature", "authenticated", 3600).unwrap();
        let bearer = format!("Bearer {}", token);

        let (status, body) = session_with(&app, Some(&bearer)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_expired_token() {
        let app = TestApp::new().unwrap();
        let token = create_test_jwt(&app.config.jwt_secret, "authenticated", -3400).unwrap();
        let bearer = format!("Bearer {}", token);

        let (status, body) = session_with(&app, Some(&bearer)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["error"]["message"],
            "Invalid token: ExpiredSignature"
        );
    }

    #[tokio::test]
    async fn test_wrong_audience() {
        let app = TestApp::new().unwrap();
        let token = create_test_jwt(&app.config.jwt_secret, "anon", 3600).unwrap();
        let bearer = format!("Bearer {}", token);

        let (status, body) = session_with(&app, Some(&bearer)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_audience_follows_config() {
        let config = TestConfig {
            audience: "storefront-admin".to_string(),
            ..TestConfig::from_env()
        };
        let auth_config = config.auth_config();
        let app = TestApp::with_auth_config(config, auth_config).unwrap();

        // Default-audience token is rejected, admin-audience token accepted
        let default_token =
            create_test_jwt(&app.config.jwt_secret, "authenticated", 3600).unwrap();
        let (status, _) = session_with(&app, Some(&format!("Bearer {}", default_token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = session_with(&app, Some(&format!("Bearer {}", app.jwt()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aud"], "storefront-admin");
    }
}

mod test_refresh {
    use super::*;

    #[tokio::test]
    async fn test_refresh_header_forwarded_verbatim() {
        let app = TestApp::new().unwrap();

        let resp = app
            .test_router()
            .oneshot(request(
                Method::POST,
                REFRESH,
                &[("refresh-token", "iL5m3C43Qg_1FVq3mGCNdQ")],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["access_token"], "mock-access-1");
        assert_eq!(body["refresh_token"], "mock-refresh-1");
        assert_eq!(body["token_type"], "bearer");

        assert_eq!(app.identity.refresh_tokens(), vec!["iL5m3C43Qg_1FVq3mGCNdQ"]);
    }

    #[tokio::test]
    async fn test_refresh_needs_no_bearer_token() {
        let app = TestApp::new().unwrap();
        let expired = create_test_jwt(&app.config.jwt_secret, "authenticated", -60).unwrap();
        let bearer = format!("Bearer {}", expired);

        let resp = app
            .test_router()
            .oneshot(request(
                Method::POST,
                REFRESH,
                &[("authorization", bearer.as_str()), ("refresh-token", "r1")],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_refresh_header() {
        let app = TestApp::new().unwrap();

        for headers in [vec![], vec![("refresh-token", "")]] {
            let resp = app
                .test_router()
                .oneshot(request(Method::POST, REFRESH, &headers))
                .await
                .unwrap();

            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body = parse_body(resp).await;
            assert_eq!(body["error"]["code"], "MISSING_REFRESH_TOKEN");
        }

        assert!(app.identity.refresh_tokens().is_empty());
    }

    #[tokio::test]
    async fn test_revoked_refresh_token() {
        let app = TestApp::new().unwrap();
        app.identity.revoke("used-token");

        let resp = app
            .test_router()
            .oneshot(request(Method::POST, REFRESH, &[("refresh-token", "used-token")]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "IDENTITY_REJECTED");
        assert_eq!(body["error"]["message"], "Invalid Refresh Token: Already Used");
    }
}

mod test_reset_password {
    use super::*;

    #[tokio::test]
    async fn test_password_change_uses_caller_token() {
        let app = TestApp::new().unwrap();
        let token = app.jwt();
        let bearer = format!("Bearer {}", token);

        let resp = app
            .test_router()
            .oneshot(json_request(
                Method::POST,
                RESET_PASSWORD,
                &[("authorization", bearer.as_str())],
                serde_json::json!({ "password": "correct horse battery" }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["user"]["id"], storefront_identity::mock::MOCK_USER_ID);
        assert_eq!(app.identity.password_updates(), vec![token]);
    }

    #[tokio::test]
    async fn test_short_password_rejected_locally() {
        let app = TestApp::new().unwrap();
        let bearer = app.bearer();

        let resp = app
            .test_router()
            .oneshot(json_request(
                Method::POST,
                RESET_PASSWORD,
                &[("authorization", bearer.as_str())],
                serde_json::json!({ "password": "abc" }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(app.identity.password_updates().is_empty());
    }

    #[tokio::test]
    async fn test_requires_bearer_token() {
        let app = TestApp::new().unwrap();

        let resp = app
            .test_router()
            .oneshot(json_request(
                Method::POST,
                RESET_PASSWORD,
                &[],
                serde_json::json!({ "password": "correct horse battery" }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");
    }
}

mod test_startup {
    use super::*;

    #[tokio::test]
    async fn test_missing_secret_aborts_app_creation() {
        let config = TestConfig::from_env();
        let auth_config = AuthConfig {
            jwt_secret: None,
            ..config.auth_config()
        };

        assert!(TestApp::with_auth_config(config, auth_config).is_err());
    }
}

mod test_protected_customer_routes {
    use super::*;

    #[tokio::test]
    async fn test_wallet_routes_reject_before_database() {
        let app = TestApp::new().unwrap();
        let id = Uuid::new_v4();
        let expired = create_test_jwt(&app.config.jwt_secret, "authenticated", -60).unwrap();
        let bearer = format!("Bearer {}", expired);

        for (method, uri) in [
            (Method::GET, format!("/v1/customers/{}", id)),
            (Method::PUT, format!("/v1/customers/deduct/{}?amount=20.00", id)),
            (Method::PUT, format!("/v1/customers/add_money/{}?money=50.00", id)),
        ] {
            let resp = app
                .test_router()
                .oneshot(request(
                    method.clone(),
                    &uri,
                    &[("authorization", bearer.as_str())],
                ))
                .await
                .unwrap();

            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        }
    }
}
