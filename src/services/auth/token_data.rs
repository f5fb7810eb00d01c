use std::collections::HashSet;

use serde::Serialize;

use super::claims::Claims;
use super::error::TokenError;
use super::role::Role;

/// Validated view of a bearer token, as handed to handlers.
///
/// Only `TokenValidator` builds this, and only for a token that was unexpired at
/// validation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    valid: bool,
    user_id: i64,
    email: String,
    roles: HashSet<Role>,
    token: String,
}

impl TokenData {
    pub(super) fn from_claims(claims: &Claims, token: &str) -> Result<Self, TokenError> {
        Ok(Self {
            valid: true,
            user_id: claims.user_id()?,
            email: claims.email()?.to_string(),
            roles: claims.roles()?,
            token: token.to_string(),
        })
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> &HashSet<Role> {
        &self.roles
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }
}
