use crate::domain::Role;

/// Role changes an admin can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// client → delivery
    PromoteToDelivery,
    /// delivery → client
    DemoteToClient,
    /// client → inactive
    Deactivate,
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            UserAction::PromoteToDelivery => "promote",
            UserAction::DemoteToClient => "demote",
            UserAction::Deactivate => "deactivate",
        }
    }

    /// Required current role and the role it leads to.
    pub fn transition(&self) -> (Role, Role) {
        match self {
            UserAction::PromoteToDelivery => (Role::Client, Role::Delivery),
            UserAction::DemoteToClient => (Role::Delivery, Role::Client),
            UserAction::Deactivate => (Role::Client, Role::Inactive),
        }
    }
}

/// The user's role after the action.
pub type UserActionResult = Role;
