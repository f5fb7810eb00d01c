/// Factory: build `TokenValidator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenValidator;
use crate::services::auth::token_validator::KeyError;

pub fn build_token_validator(config: &Config) -> Result<Arc<TokenValidator>, KeyError> {
    let validator =
        TokenValidator::from_base64_secret(&config.jwt_secret, config.token_leeway_seconds)
            .inspect_err(|e| tracing::error!(error = %e, "failed to load JWT_SECRET"))?;

    Ok(Arc::new(validator))
}
