use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::coupon_actor::{CouponAction, CouponError};
use crate::domain::{Coupon, CouponCreate, CouponPatch};

/// Client for interacting with the Coupon actor.
///
/// Coupons are keyed by their code, matched exactly.
#[derive(Clone)]
pub struct CouponClient {
    inner: ResourceClient<Coupon>,
}

impl_from_framework_error!(CouponError);
impl_basic_client!(CouponClient, Coupon, CouponError, coupon, coupons);

impl CouponClient {
    /// Store a new active coupon under `code`, replacing any coupon with that code.
    #[instrument(skip(self))]
    pub async fn add_coupon(&self, code: String, params: CouponCreate) -> Result<Coupon, CouponError> {
        if code.trim().is_empty() {
            return Err(CouponError::Validation("coupon code is required".to_string()));
        }
        params.validate()?;
        let coupon = self.inner.put(code, params).await?;
        info!(code = %coupon.code, discount = coupon.discount, "Coupon added");
        Ok(coupon)
    }

    #[instrument(skip(self))]
    pub async fn find_coupon(&self, code: &str) -> Result<Option<Coupon>, CouponError> {
        debug!("Sending request");
        Ok(self.inner.get(code.to_string()).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_coupon(&self, code: String, patch: CouponPatch) -> Result<Coupon, CouponError> {
        debug!("Sending request");
        Ok(self.inner.update(code, patch).await?)
    }

    /// Returns whether the coupon was inactive before.
    #[instrument(skip(self))]
    pub async fn activate(&self, code: String) -> Result<bool, CouponError> {
        Ok(self.inner.perform_action(code, CouponAction::Activate).await?)
    }

    /// Returns whether the coupon was active before.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, code: String) -> Result<bool, CouponError> {
        Ok(self.inner.perform_action(code, CouponAction::Deactivate).await?)
    }
}
