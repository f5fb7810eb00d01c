use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::TokenError;
use super::role::{Role, decode_roles};

/// Decoded token payload.
///
/// `sub` follows the issuer's contract `"{user_id},{email}"`. `roles` is kept raw and
/// decoded on demand so a bad roles claim surfaces as `InvalidRoleFormat` instead of
/// failing the whole decode. Every other field is preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub roles: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// `exp` strictly before `now` (unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }

    pub fn roles(&self) -> Result<HashSet<Role>, TokenError> {
        decode_roles(&self.roles)
    }

    pub fn user_id(&self) -> Result<i64, TokenError> {
        let (user_id, _) = self.subject_parts()?;
        user_id
            .parse::<i64>()
            .map_err(|_| TokenError::NotNumeric(user_id.to_string()))
    }

    pub fn email(&self) -> Result<&str, TokenError> {
        let (_, email) = self.subject_parts()?;
        Ok(email)
    }

    // Split on the first comma; both halves must be present.
    fn subject_parts(&self) -> Result<(&str, &str), TokenError> {
        match self.sub.split_once(',') {
            Some((user_id, email)) if !user_id.is_empty() && !email.is_empty() => {
                Ok((user_id, email))
            }
            _ => Err(TokenError::MalformedSubject),
        }
    }
}
