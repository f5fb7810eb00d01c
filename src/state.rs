/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: validator: TokenValidator
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::TokenValidator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }
}
