use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::TokenError;

/// Role granted to a user, as carried in the `roles` claim.
///
/// Compared and hashed by value, so a set of roles ignores ordering and duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "integer_like")]
    pub id: i64,
    pub name: String,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// Issuers may emit the id as a JSON number or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerLike {
    Int(i64),
    Text(String),
}

fn integer_like<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntegerLike::deserialize(deserializer)? {
        IntegerLike::Int(n) => Ok(n),
        IntegerLike::Text(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("role id '{}' is not an integer", s))),
    }
}

/// Decode the raw `roles` claim into a set.
///
/// - missing / null / empty list -> empty set
/// - null list elements are skipped
/// - any other element must be a map with `id` and `name`
pub fn decode_roles(claim: &Value) -> Result<HashSet<Role>, TokenError> {
    let items = match claim {
        Value::Null => return Ok(HashSet::new()),
        Value::Array(items) => items,
        other => {
            return Err(TokenError::InvalidRoleFormat(format!(
                "expected a list, got {}",
                json_kind(other)
            )));
        }
    };

    let mut roles = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Null => continue,
            Value::Object(_) => {
                let role = Role::deserialize(item).map_err(|e| {
                    TokenError::InvalidRoleFormat(format!("element {}: {}", index, e))
                })?;
                roles.insert(role);
            }
            other => {
                return Err(TokenError::InvalidRoleFormat(format!(
                    "element {}: expected a map, got {}",
                    index,
                    json_kind(other)
                )));
            }
        }
    }

    Ok(roles)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}
