//! Bearer token 検証 → TokenData を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を受け取り、`TokenValidator` で署名/期限を検証する
//! - 成功時は `TokenData` を request extensions に格納し、handler は extractor で受け取る
//! - 失敗時は `TokenError` を `AppError` (401/400) に変換して返す

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Protect every route of `router` with bearer-token validation.
///
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req).ok_or_else(|| {
        AppError::unauthorized("MISSING_BEARER_TOKEN", "missing bearer token")
    })?;

    let token_data = match state.validator.token_data(token) {
        Ok(data) => data,
        Err(err) => {
            // never log the token itself
            if err.is_authentication_failure() {
                tracing::warn!(error = %err, "access token rejected");
            } else {
                tracing::info!(error = %err, "access token does not follow the subject/roles contract");
            }
            return Err(err.into());
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(token_data);

    Ok(next.run(req).await)
}
