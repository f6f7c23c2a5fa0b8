use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Access level of a user. Decides which dashboard they see and what they may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Admin,
    Delivery,
    Inactive,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Admin => "admin",
            Role::Delivery => "delivery",
            Role::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "admin" => Ok(Role::Admin),
            "delivery" => Ok(Role::Delivery),
            "inactive" => Ok(Role::Inactive),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Parameters for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Profile changes a user can make to themselves.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// What the authentication provider tells us about a signed-in account.
#[derive(Debug, Clone)]
pub struct SignInIdentity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Name given to provider accounts that expose no display name.
pub const DEFAULT_PROVIDER_NAME: &str = "Usuario de Google";

impl User {
    /// Creates a new User instance.
    ///
    /// The `id` field is left empty and is set by the store on creation.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
            role,
            phone: None,
            address: None,
        }
    }
}
