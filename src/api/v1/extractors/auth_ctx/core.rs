use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::TokenData;
use crate::state::AppState;

/// Handler で TokenData を受け取るための extractor
/// middleware が TokenData を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定）
pub struct Authenticated(pub TokenData);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenData>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| AppError::unauthorized("UNAUTHENTICATED", "request is not authenticated"))
    }
}
