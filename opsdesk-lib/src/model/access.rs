//! Users, roles and the session user

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// The logged-in user, from `/auth/me`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Me {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// Login form body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInput {
    pub login: String,
    pub password: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
}

/// Partial user update; unset fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleInput {
    pub name: String,
}

/// Splits a comma-separated role list, trimming and dropping empties.
pub fn parse_roles(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}
