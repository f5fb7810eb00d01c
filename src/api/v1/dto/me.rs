/*
 * Responsibility
 * - /me の response DTO
 * - roles は id 順に並べて返す (TokenData 側は順序を持たない set)
 */
use serde::Serialize;

use crate::services::auth::{Role, TokenData};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: i64,
    pub email: String,
    pub roles: Vec<RoleResponse>,
}

#[derive(Debug, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

impl From<&TokenData> for MeResponse {
    fn from(data: &TokenData) -> Self {
        let mut roles: Vec<RoleResponse> = data.roles().iter().map(RoleResponse::from).collect();
        roles.sort();

        Self {
            user_id: data.user_id(),
            email: data.email().to_string(),
            roles,
        }
    }
}
