use crate::actor_framework::Entity;
use crate::domain::{Coupon, CouponCreate, CouponPatch};

use super::actions::{CouponAction, CouponActionResult};
use super::error::CouponError;

impl Entity for Coupon {
    type Id = String;
    type CreateParams = CouponCreate;
    type Patch = CouponPatch;
    type Action = CouponAction;
    type ActionResult = CouponActionResult;
    type Error = CouponError;

    /// New coupons are stored active under their code.
    fn from_create_params(code: String, params: CouponCreate) -> Result<Self, CouponError> {
        if code.trim().is_empty() {
            return Err(CouponError::Validation("coupon code is required".to_string()));
        }
        params.validate()?;
        Ok(Self {
            code,
            discount: params.discount,
            description: params.description,
            expires_at: params.expires_at,
            is_active: true,
        })
    }

    fn on_update(&mut self, patch: CouponPatch) -> Result<(), CouponError> {
        let candidate = CouponCreate {
            discount: patch.discount.unwrap_or(self.discount),
            description: patch.description.unwrap_or_else(|| self.description.clone()),
            expires_at: patch.expires_at.unwrap_or_else(|| self.expires_at.clone()),
        };
        candidate.validate()?;
        self.discount = candidate.discount;
        self.description = candidate.description;
        self.expires_at = candidate.expires_at;
        Ok(())
    }

    fn handle_action(&mut self, action: CouponAction) -> Result<CouponActionResult, CouponError> {
        let active = action == CouponAction::Activate;
        let changed = self.is_active != active;
        self.is_active = active;
        Ok(changed)
    }
}
