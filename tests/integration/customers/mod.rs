//! Customer and wallet integration tests against a live database
//!
//! Ignored by default; they need `TEST_DATABASE_URL` pointing at a
//! disposable Postgres instance.

use axum::http::{Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{json_request, parse_body, request, TestApp};

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

mod test_wallet {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_deduct_money() {
        let app = TestApp::connected().await.unwrap();
        let id = app.create_test_customer(money(10000)).await.unwrap();
        let bearer = app.bearer();

        let resp = app
            .test_router()
            .oneshot(request(
                Method::PUT,
                &format!("/v1/customers/deduct/{}?amount=20.00", id),
                &[("authorization", bearer.as_str())],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Money deducted successfully");
        assert_eq!(body["data"]["id"], id.to_string());
        assert_eq!(body["data"]["wallet"], "80.00");
        assert_eq!(app.wallet_of(id).await.unwrap(), money(8000));

        app.delete_test_customer(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_deduct_entire_balance() {
        let app = TestApp::connected().await.unwrap();
        let id = app.create_test_customer(money(1500)).await.unwrap();
        let bearer = app.bearer();

        let resp = app
            .test_router()
            .oneshot(request(
                Method::PUT,
                &format!("/v1/customers/deduct/{}?amount=15", id),
                &[("authorization", bearer.as_str())],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(app.wallet_of(id).await.unwrap(), Decimal::ZERO);

        app.delete_test_customer(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_add_money() {
        let app = TestApp::connected().await.unwrap();
        let id = app.create_test_customer(money(10000)).await.unwrap();
        let bearer = app.bearer();

        let resp = app
            .test_router()
            .oneshot(request(
                Method::PUT,
                &format!("/v1/customers/add_money/{}?money=50.00", id),
                &[("authorization", bearer.as_str())],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Money added to wallet");
        assert_eq!(body["data"]["wallet"], "150.00");
        assert_eq!(app.wallet_of(id).await.unwrap(), money(15000));

        app.delete_test_customer(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_unknown_customer() {
        let app = TestApp::connected().await.unwrap();
        let bearer = app.bearer();
        let id = Uuid::new_v4();

        for uri in [
            format!("/v1/customers/deduct/{}?amount=20.00", id),
            format!("/v1/customers/add_money/{}?money=50.00", id),
        ] {
            let resp = app
                .test_router()
                .oneshot(request(Method::PUT, &uri, &[("authorization", bearer.as_str())]))
                .await
                .unwrap();

            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
            let body = parse_body(resp).await;
            assert_eq!(body["error"]["code"], "NOT_FOUND");
            assert_eq!(body["error"]["message"], "Customer not found");
        }
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_insufficient_funds_leaves_wallet_untouched() {
        let app = TestApp::connected().await.unwrap();
        let id = app.create_test_customer(money(1500)).await.unwrap();
        let bearer = app.bearer();

        let resp = app
            .test_router()
            .oneshot(request(
                Method::PUT,
                &format!("/v1/customers/deduct/{}?amount=20.00", id),
                &[("authorization", bearer.as_str())],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "INSUFFICIENT_FUNDS");
        assert_eq!(body["error"]["message"], "Not enough money in wallet");
        assert_eq!(body["error"]["details"]["wallet"], "15.00");
        assert_eq!(app.wallet_of(id).await.unwrap(), money(1500));

        app.delete_test_customer(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_non_positive_amount() {
        let app = TestApp::connected().await.unwrap();
        let id = app.create_test_customer(money(1500)).await.unwrap();
        let bearer = app.bearer();

        for uri in [
            format!("/v1/customers/deduct/{}?amount=0", id),
            format!("/v1/customers/add_money/{}?money=-5", id),
        ] {
            let resp = app
                .test_router()
                .oneshot(request(Method::PUT, &uri, &[("authorization", bearer.as_str())]))
                .await
                .unwrap();

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
        assert_eq!(app.wallet_of(id).await.unwrap(), money(1500));

        app.delete_test_customer(id).await.unwrap();
    }
}

mod test_records {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_create_read_update_delete() {
        let app = TestApp::connected().await.unwrap();
        let bearer = app.bearer();
        let auth = [("authorization", bearer.as_str())];
        let email = format!("crud_{}@storefront.test", Uuid::new_v4().simple());

        let resp = app
            .test_router()
            .oneshot(json_request(
                Method::POST,
                "/v1/customers",
                &auth,
                json!({ "name": "John Doe", "email": email, "wallet": "100.00" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = parse_body(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["wallet"], "100.00");

        let resp = app
            .test_router()
            .oneshot(json_request(
                Method::PUT,
                &format!("/v1/customers/{}", id),
                &auth,
                json!({ "name": "Johnny Doe" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = parse_body(resp).await;
        assert_eq!(updated["name"], "Johnny Doe");
        assert_eq!(updated["email"], email.as_str());

        let resp = app
            .test_router()
            .oneshot(request(Method::GET, &format!("/v1/customers/{}", id), &auth))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .test_router()
            .oneshot(request(Method::DELETE, &format!("/v1/customers/{}", id), &auth))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = app
            .test_router()
            .oneshot(request(Method::GET, &format!("/v1/customers/{}", id), &auth))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_duplicate_email_conflicts() {
        let app = TestApp::connected().await.unwrap();
        let bearer = app.bearer();
        let auth = [("authorization", bearer.as_str())];
        let email = format!("dup_{}@storefront.test", Uuid::new_v4().simple());
        let payload = json!({ "name": "Jane Smith", "email": email });

        let first = app
            .test_router()
            .oneshot(json_request(Method::POST, "/v1/customers", &auth, payload.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let id: Uuid = parse_body(first).await["id"].as_str().unwrap().parse().unwrap();

        let second = app
            .test_router()
            .oneshot(json_request(Method::POST, "/v1/customers", &auth, payload))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(parse_body(second).await["error"]["code"], "CONFLICT");

        app.delete_test_customer(id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_create_many_is_all_or_nothing() {
        let app = TestApp::connected().await.unwrap();
        let bearer = app.bearer();
        let auth = [("authorization", bearer.as_str())];
        let email = format!("batch_{}@storefront.test", Uuid::new_v4().simple());

        let resp = app
            .test_router()
            .oneshot(json_request(
                Method::POST,
                "/v1/customers/many",
                &auth,
                json!([
                    { "name": "Alice Johnson", "email": email },
                    { "name": "Alice Again", "email": email },
                ]),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers WHERE email = $1")
            .bind(&email)
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
