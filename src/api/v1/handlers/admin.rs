/*
 * Responsibility
 * - GET /admin/ping: ADMIN role を持つユーザーだけが通る (role による認可の確認用)
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::Authenticated;
use crate::error::AppError;

pub const ADMIN_ROLE: &str = "ADMIN";

pub async fn admin_ping(Authenticated(token): Authenticated) -> Result<Json<Value>, AppError> {
    if !token.has_role(ADMIN_ROLE) {
        tracing::info!(user_id = token.user_id(), "admin route denied");
        return Err(AppError::Forbidden);
    }

    Ok(Json(json!({"status": "ok", "userId": token.user_id()})))
}
