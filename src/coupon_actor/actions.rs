/// Custom actions for coupons beyond plain CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponAction {
    Activate,
    Deactivate,
}

/// Whether the action changed the coupon's activation flag.
pub type CouponActionResult = bool;
