/*
 * Responsibility
 * - GET /auth/token: 検証済み TokenData をそのまま返す (validate endpoint)
 */
use axum::Json;

use crate::api::v1::extractors::Authenticated;
use crate::services::auth::TokenData;

pub async fn token_data(Authenticated(token): Authenticated) -> Json<TokenData> {
    Json(token)
}
