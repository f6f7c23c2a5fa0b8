use tracing::info;

use crate::domain::{Actor, Role, User};

/// The signed-in user, created at sign-in and consumed by [`Session::logout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    /// Who this session acts as on orders. Inactive users act as nobody.
    pub fn actor(&self) -> Option<Actor> {
        match self.role {
            Role::Client => Some(Actor::Client { user_id: self.user_id.clone() }),
            Role::Admin => Some(Actor::Admin),
            Role::Delivery => Some(Actor::Delivery { delivery_id: self.user_id.clone() }),
            Role::Inactive => None,
        }
    }

    pub fn logout(self) {
        info!(user_id = %self.user_id, "Signed out");
    }
}

/// Result of signing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    pub session: Session,
    /// The account was created by this sign-in.
    pub is_new: bool,
}
