//! Token minting helpers shared by unit tests.
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

pub const SECRET: &[u8] = b"profile-service-test-secret-0123456789";
pub const OTHER_SECRET: &[u8] = b"some-other-service-secret-9876543210";

pub fn now() -> i64 {
    Utc::now().timestamp()
}

pub fn claims(sub: &str, expires_in: i64, roles: Value) -> Value {
    json!({
        "sub": sub,
        "exp": now() + expires_in,
        "iat": now(),
        "roles": roles,
    })
}

pub fn claims_without_roles(sub: &str, expires_in: i64) -> Value {
    json!({
        "sub": sub,
        "exp": now() + expires_in,
    })
}

pub fn mint(claims: &Value) -> String {
    mint_with(SECRET, Algorithm::HS256, claims)
}

pub fn mint_with(secret: &[u8], alg: Algorithm, claims: &Value) -> String {
    jsonwebtoken::encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret))
        .expect("sign test token")
}
