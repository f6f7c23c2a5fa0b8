//! The cart of one signed-in (or anonymous) visitor, wired to the coupon and
//! order stores.
//!
//! Every rejected operation is reported through the [`Notifier`] and returned
//! as a [`CartError`]; the cart is left as it was.

mod error;

pub use error::*;

use jiff::Timestamp;
use tracing::{debug, info, instrument};

use crate::clients::{CouponClient, OrderClient};
use crate::coupon_actor::CouponError;
use crate::domain::{Cart, OrderCreate, PaymentMethod, Role, Selectable};
use crate::notifications::{Notification, Notifier};
use crate::session::Session;

pub struct Checkout {
    cart: Cart,
    session: Option<Session>,
    coupons: CouponClient,
    orders: OrderClient,
    notifier: Notifier,
}

impl Checkout {
    pub fn new(session: Option<Session>, coupons: CouponClient, orders: OrderClient, notifier: Notifier) -> Self {
        Self {
            cart: Cart::new(),
            session,
            coupons,
            orders,
            notifier,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Attach a session, keeping the cart.
    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Detach the session for logout, keeping the cart.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.session.take()
    }

    fn reject<T>(&self, error: CartError) -> Result<T, CartError> {
        self.notifier.notify(Notification::from(&error));
        Err(error)
    }

    pub fn add(&mut self, item: &impl Selectable, quantity: u32) -> Result<(), CartError> {
        match self.cart.add(item, quantity) {
            Ok(()) => {
                debug!(item_id = item.id(), quantity, "Added to cart");
                Ok(())
            }
            Err(e) => self.reject(e),
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.cart.remove(id)
    }

    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> Result<bool, CartError> {
        match self.cart.update_quantity(id, quantity) {
            Ok(updated) => Ok(updated),
            Err(e) => self.reject(e),
        }
    }

    pub fn set_comments(&mut self, text: impl Into<String>) -> Result<(), CartError> {
        match self.cart.set_comments(text) {
            Ok(()) => Ok(()),
            Err(e) => self.reject(e),
        }
    }

    pub fn set_payment(&mut self, payment: PaymentMethod) {
        self.cart.set_payment(payment);
    }

    pub async fn apply_coupon(&mut self, code: &str) -> Result<f64, CartError> {
        self.apply_coupon_at(code, Timestamp::now()).await
    }

    /// Look up `code` and, if it can be redeemed at `now`, take its discount.
    ///
    /// Unknown, inactive, unreadable or expired coupons leave the discount unchanged.
    #[instrument(skip(self))]
    pub async fn apply_coupon_at(&mut self, code: &str, now: Timestamp) -> Result<f64, CartError> {
        let coupon = match self.coupons.find_coupon(code).await {
            Ok(Some(coupon)) => coupon,
            Ok(None) => return self.reject(CartError::InvalidCoupon(code.to_string())),
            Err(e) => return self.reject(CartError::Coupon(e)),
        };

        let percentage = match coupon.redeem(now) {
            Ok(percentage) => percentage,
            Err(CouponError::Expired(code)) => return self.reject(CartError::ExpiredCoupon(code)),
            Err(CouponError::Invalid(_) | CouponError::InvalidExpiry(_)) => {
                return self.reject(CartError::InvalidCoupon(code.to_string()))
            }
            Err(e) => return self.reject(CartError::Coupon(e)),
        };

        self.cart.set_discount_percentage(percentage);
        info!(percentage, "Coupon applied");
        self.notifier.notify(Notification::success(
            "Cupón Aplicado",
            format!("Se aplicó un descuento del {percentage}%"),
        ));
        Ok(percentage)
    }

    pub async fn confirm_order(&mut self) -> Result<String, CartError> {
        self.confirm_order_at(Timestamp::now()).await
    }

    /// Persist the cart as an order stamped with `now`, then clear it.
    #[instrument(skip(self))]
    pub async fn confirm_order_at(&mut self, now: Timestamp) -> Result<String, CartError> {
        let Some(session) = &self.session else {
            return self.reject(CartError::AuthRequired);
        };
        if session.role != Role::Client {
            return self.reject(CartError::NotAClient(session.role));
        }
        if self.cart.is_empty() {
            return self.reject(CartError::Empty);
        }

        let comments = self.cart.comments();
        let params = OrderCreate {
            user_id: session.user_id.clone(),
            items: self.cart.order_items(),
            total: self.cart.total(),
            discount: self.cart.discount_amount(),
            address: None,
            comments: (!comments.is_empty()).then(|| comments.to_string()),
            payment: self.cart.payment(),
            timestamp: now.as_millisecond(),
        };

        match self.orders.place_order(params).await {
            Ok(id) => {
                self.cart.clear();
                self.cart.close();
                info!(order_id = %id, "Order confirmed");
                self.notifier.notify(Notification::success(
                    "Pedido Confirmado",
                    "Tu pedido fue realizado con éxito.",
                ));
                Ok(id)
            }
            Err(e) => self.reject(CartError::Order(e)),
        }
    }
}
