use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Failures of token validation.
///
/// `TokenExpired`, `InvalidSignature` and `NotYetValid` are authentication failures;
/// the others mean the token does not follow the expected structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has expired")]
    TokenExpired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is not valid yet")]
    NotYetValid,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("subject is not of the form '<user id>,<email>'")]
    MalformedSubject,

    #[error("invalid 'roles' claim: {0}")]
    InvalidRoleFormat(String),

    #[error("user id '{0}' is not an integer")]
    NotNumeric(String),
}

impl TokenError {
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::TokenExpired | Self::InvalidSignature | Self::NotYetValid
        )
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            // A non-HMAC `alg` can never verify against the shared secret.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::InvalidSignature,
            _ => Self::Malformed(e.to_string()),
        }
    }
}
