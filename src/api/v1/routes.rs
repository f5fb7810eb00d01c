/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、それ以外は Bearer 検証 (middleware::auth::access) の内側
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{admin::admin_ping, health::health, me::me, token::token_data};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route("/auth/token", get(token_data))
        .route("/admin/ping", get(admin_ping));

    Router::new()
        .route("/health", get(health))
        .merge(access::apply(protected, state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::services::auth::TokenValidator;
    use crate::services::auth::test_support::{OTHER_SECRET, SECRET, claims, mint, mint_with};

    fn app() -> Router {
        let validator = TokenValidator::new(SECRET, 0).unwrap();
        let state = AppState::new(Arc::new(validator));
        Router::new()
            .nest("/api/v1", routes(state.clone()))
            .with_state(state)
    }

    async fn send(path: &str, authorization: Option<String>) -> Response {
        let mut req = Request::builder().uri(path);
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        app()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn bearer(token: &str) -> Option<String> {
        Some(format!("Bearer {}", token))
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let res = send("/api/v1/health", None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn me_returns_caller_identity() {
        let token = mint(&claims(
            "42,alice@example.com",
            3600,
            json!([{"id": 2, "name": "ADMIN"}, {"id": 1, "name": "USER"}]),
        ));

        let res = send("/api/v1/me", bearer(&token)).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            json_body(res).await,
            json!({
                "userId": 42,
                "email": "alice@example.com",
                "roles": [{"id": 1, "name": "USER"}, {"id": 2, "name": "ADMIN"}]
            })
        );
    }

    #[tokio::test]
    async fn token_endpoint_echoes_token_data() {
        let token = mint(&claims("7,bob@example.com", 3600, json!([])));

        let res = send("/api/v1/auth/token", bearer(&token)).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["valid"], json!(true));
        assert_eq!(body["userId"], json!(7));
        assert_eq!(body["email"], json!("bob@example.com"));
        assert_eq!(body["roles"], json!([]));
        assert_eq!(body["token"], json!(token));
    }

    #[tokio::test]
    async fn missing_or_non_bearer_header_is_unauthorized() {
        for authorization in [None, Some("Basic dXNlcjpwYXNz".to_string()), bearer("")] {
            let res = send("/api/v1/me", authorization).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                json_body(res).await["error"]["code"],
                json!("MISSING_BEARER_TOKEN")
            );
        }
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let token = mint(&claims("42,alice@example.com", -60, json!([])));

        let res = send("/api/v1/me", bearer(&token)).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(res).await["error"]["code"], json!("TOKEN_EXPIRED"));
    }

    #[tokio::test]
    async fn foreign_signature_is_unauthorized() {
        let token = mint_with(
            OTHER_SECRET,
            jsonwebtoken::Algorithm::HS256,
            &claims("42,alice@example.com", 3600, json!([])),
        );

        let res = send("/api/v1/me", bearer(&token)).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(res).await["error"]["code"],
            json!("INVALID_SIGNATURE")
        );
    }

    #[tokio::test]
    async fn contract_violations_are_bad_requests() {
        let cases = [
            (claims("alice@example.com", 3600, json!([])), "MALFORMED_SUBJECT"),
            (claims("x,alice@example.com", 3600, json!([])), "INVALID_USER_ID"),
            (claims("1,alice@example.com", 3600, json!([1])), "INVALID_ROLE_FORMAT"),
        ];

        for (payload, code) in cases {
            let res = send("/api/v1/me", bearer(&mint(&payload))).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(res).await["error"]["code"], json!(code));
        }

        let res = send("/api/v1/me", bearer("not.a.token")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["error"]["code"], json!("MALFORMED_TOKEN"));
    }

    #[tokio::test]
    async fn admin_route_requires_admin_role() {
        let user = mint(&claims("1,u@example.com", 3600, json!([{"id": 1, "name": "USER"}])));
        let res = send("/api/v1/admin/ping", bearer(&user)).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let admin = mint(&claims("2,a@example.com", 3600, json!([{"id": 2, "name": "ADMIN"}])));
        let res = send("/api/v1/admin/ping", bearer(&admin)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["userId"], json!(2));
    }

    #[tokio::test]
    async fn scheme_is_case_insensitive() {
        let token = mint(&claims("42,alice@example.com", 3600, json!([])));
        let res = send("/api/v1/me", Some(format!("bearer {}", token))).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
