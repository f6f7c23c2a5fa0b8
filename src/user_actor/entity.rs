use crate::actor_framework::Entity;
use crate::domain::{Role, User, UserCreate, UserPatch};

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Error = UserError;

    /// Creates a new User from creation parameters.
    ///
    /// # Arguments
    /// * `id` - The provider uid, or a generated id
    /// * `params` - Name, email and initial role
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, UserError> {
        if params.name.trim().is_empty() {
            return Err(UserError::ValidationError("name is required".to_string()));
        }
        if params.email.trim().is_empty() {
            return Err(UserError::ValidationError("email is required".to_string()));
        }
        let mut user = User::new(params.name, params.email, params.role);
        user.id = id;
        Ok(user)
    }

    /// Updates the user's profile information.
    ///
    /// Address and phone are only kept for clients; other roles ignore them.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), UserError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(UserError::ValidationError("name cannot be empty".to_string()));
            }
            self.name = name;
        }
        if self.role == Role::Client {
            if let Some(phone) = patch.phone {
                self.phone = Some(phone);
            }
            if let Some(address) = patch.address {
                self.address = Some(address);
            }
        }
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> Result<UserActionResult, UserError> {
        let (from, to) = action.transition();
        if self.role != from {
            return Err(UserError::RoleChange {
                action: action.name(),
                role: self.role,
            });
        }
        self.role = to;
        Ok(to)
    }
}
