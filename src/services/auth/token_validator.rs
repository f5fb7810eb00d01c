use std::collections::HashSet;
use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use super::claims::Claims;
use super::error::TokenError;
use super::role::Role;
use super::token_data::TokenData;

/// Minimum HMAC secret length (256 bits).
pub const MIN_SECRET_BYTES: usize = 32;

/// Upper bound for clock leeway (one day). The decoder subtracts it from "now".
pub const MAX_LEEWAY_SECONDS: u64 = 86_400;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("signing secret is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("signing secret must be at least 256 bits, got {bits}")]
    TooShort { bits: usize },

    #[error("clock leeway must be at most {max} seconds, got {got}")]
    LeewayTooLarge { got: u64, max: u64 },
}

/// Outcome of a single decode: the token is usable, expired, or rejected for another reason.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenStatus {
    Valid(Claims),
    Expired,
    Invalid(TokenError),
}

/// HMAC-SHA bearer-token validator.
///
/// - Holds the decoded secret and the validation settings; never mutated after construction.
/// - Cheap to share: wrap in `Arc` and call from any number of request tasks.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenValidator")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenValidator {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Result<Self, KeyError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(KeyError::TooShort {
                bits: secret.len() * 8,
            });
        }
        if leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(KeyError::LeewayTooLarge {
                got: leeway_seconds,
                max: MAX_LEEWAY_SECONDS,
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.validate_nbf = true;
        // Tokens are not audience-scoped.
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Build from the base64 (standard alphabet) secret found in configuration.
    pub fn from_base64_secret(secret: &str, leeway_seconds: u64) -> Result<Self, KeyError> {
        let bytes = STANDARD.decode(secret.trim())?;
        Self::new(&bytes, leeway_seconds)
    }

    /// Verify the signature and decode the payload.
    ///
    /// Expiry detected while decoding is reported as `TokenExpired`.
    pub fn parse_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Decode once and classify the token.
    ///
    /// An expiry reported by the decoder and an `exp` found in the past afterwards both
    /// land in `Expired`.
    pub fn classify(&self, token: &str) -> TokenStatus {
        let decoded = self.parse_claims(token);
        // leeway is capped at MAX_LEEWAY_SECONDS, so the cast cannot truncate
        let cutoff = Utc::now().timestamp() - self.validation.leeway as i64;
        status_of(decoded, cutoff)
    }

    /// `true` when the token's `exp` is in the past. Failures other than expiry propagate.
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        match self.classify(token) {
            TokenStatus::Valid(_) => Ok(false),
            TokenStatus::Expired => Ok(true),
            TokenStatus::Invalid(e) => Err(e),
        }
    }

    /// Validate the token and extract user id, email and roles.
    ///
    /// This is the recommended entry-point for middleware/handlers.
    pub fn token_data(&self, token: &str) -> Result<TokenData, TokenError> {
        match self.classify(token) {
            TokenStatus::Valid(claims) => {
                let data = TokenData::from_claims(&claims, token)?;
                tracing::debug!(
                    user_id = data.user_id(),
                    roles = data.roles().len(),
                    "token validated"
                );
                Ok(data)
            }
            TokenStatus::Expired => Err(TokenError::TokenExpired),
            TokenStatus::Invalid(e) => Err(e),
        }
    }

    pub fn roles(&self, token: &str) -> Result<HashSet<Role>, TokenError> {
        self.parse_claims(token)?.roles()
    }

    pub fn email(&self, token: &str) -> Result<String, TokenError> {
        self.parse_claims(token)?.email().map(str::to_string)
    }

    pub fn user_id(&self, token: &str) -> Result<i64, TokenError> {
        self.parse_claims(token)?.user_id()
    }
}

// Fold a decode result into a status. The decoder already rejects an expired `exp`
// with the same leeway, so the explicit check only matters if that check is disabled
// or the clock moves between the two reads.
fn status_of(decoded: Result<Claims, TokenError>, cutoff: i64) -> TokenStatus {
    match decoded {
        Ok(claims) if claims.is_expired_at(cutoff) => TokenStatus::Expired,
        Ok(claims) => TokenStatus::Valid(claims),
        Err(TokenError::TokenExpired) => TokenStatus::Expired,
        Err(e) => TokenStatus::Invalid(e),
    }
}
