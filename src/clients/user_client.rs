use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Role, SignInIdentity, User, UserCreate, UserPatch, DEFAULT_PROVIDER_NAME};
use crate::session::{Session, SignIn};
use crate::user_actor::{UserAction, UserError};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_from_framework_error!(UserError);
impl_basic_client!(UserClient, User, UserError, user, users);

impl UserClient {
    /// Store a user under a generated id.
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<String, UserError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    /// Find-or-create the account behind a provider identity.
    ///
    /// New accounts are clients named after the provider display name.
    #[instrument(skip(self), fields(uid = %identity.uid))]
    pub async fn sign_in_with_provider(&self, identity: SignInIdentity) -> Result<SignIn, UserError> {
        let email = identity
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| UserError::ValidationError("the provider returned no email".to_string()))?;

        let name = identity
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_string());
        let params = UserCreate { name, email, role: Role::Client };

        // One store request, so a concurrent sign-in or role change cannot be overwritten.
        let (user, is_new) = self.inner.get_or_put(identity.uid, params).await?;
        if is_new {
            info!("New client registered");
        } else {
            info!(role = %user.role, "Existing user signed in");
        }
        Ok(SignIn { session: Session::for_user(&user), is_new })
    }

    #[instrument(skip(self))]
    pub async fn sign_in_with_email(&self, email: &str) -> Result<Session, UserError> {
        let users = self.inner.list().await?;
        match users.iter().find(|user| user.email == email) {
            Some(user) => {
                info!(user_id = %user.id, role = %user.role, "Signed in");
                Ok(Session::for_user(user))
            }
            None => {
                warn!("Unknown email");
                Err(UserError::NotFound(email.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn promote_to_delivery(&self, id: String) -> Result<Role, UserError> {
        self.change_role(id, UserAction::PromoteToDelivery).await
    }

    #[instrument(skip(self))]
    pub async fn demote_to_client(&self, id: String) -> Result<Role, UserError> {
        self.change_role(id, UserAction::DemoteToClient).await
    }

    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: String) -> Result<Role, UserError> {
        self.change_role(id, UserAction::Deactivate).await
    }

    async fn change_role(&self, id: String, action: UserAction) -> Result<Role, UserError> {
        debug!(?action, "Sending request");
        let role = self.inner.perform_action(id, action).await?;
        info!(%role, "Role changed");
        Ok(role)
    }
}
