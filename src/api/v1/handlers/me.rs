/*
 * Responsibility
 * - GET /me: 認証済みユーザーの id / email / roles を返す
 */
use axum::Json;

use crate::api::v1::{dto::me::MeResponse, extractors::Authenticated};

pub async fn me(Authenticated(token): Authenticated) -> Json<MeResponse> {
    Json(MeResponse::from(&token))
}
