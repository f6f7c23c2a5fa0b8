use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::coupon_actor::CouponError;

/// Expiry as stored: either epoch milliseconds or a date/timestamp string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpiresAt {
    EpochMillis(i64),
    Text(String),
}

impl ExpiresAt {
    /// Resolve the stored expiry to an instant.
    ///
    /// Text accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates, the
    /// latter taken at midnight UTC.
    pub fn to_timestamp(&self) -> Result<Timestamp, CouponError> {
        match self {
            ExpiresAt::EpochMillis(ms) => Timestamp::from_millisecond(*ms)
                .map_err(|e| CouponError::InvalidExpiry(e.to_string())),
            ExpiresAt::Text(text) => {
                let text = text.trim();
                if let Ok(timestamp) = text.parse::<Timestamp>() {
                    return Ok(timestamp);
                }
                let date: Date = text
                    .parse()
                    .map_err(|_| CouponError::InvalidExpiry(text.to_string()))?;
                date.to_zoned(TimeZone::UTC)
                    .map(|zoned| zoned.timestamp())
                    .map_err(|e| CouponError::InvalidExpiry(e.to_string()))
            }
        }
    }
}

impl From<Timestamp> for ExpiresAt {
    fn from(timestamp: Timestamp) -> Self {
        ExpiresAt::EpochMillis(timestamp.as_millisecond())
    }
}

/// A percentage discount code. Reusable until deactivated or expired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub discount: f64,
    pub description: String,
    pub expires_at: ExpiresAt,
    pub is_active: bool,
}

impl Coupon {
    /// Discount percentage this coupon grants at `now`.
    ///
    /// An inactive coupon is reported as invalid before its expiry is looked at,
    /// as is a stored discount outside `(0, 100]`.
    pub fn redeem(&self, now: Timestamp) -> Result<f64, CouponError> {
        if !self.is_active || !discount_in_range(self.discount) {
            return Err(CouponError::Invalid(self.code.clone()));
        }
        if now > self.expires_at.to_timestamp()? {
            return Err(CouponError::Expired(self.code.clone()));
        }
        Ok(self.discount)
    }
}

/// Parameters for a new coupon. The code is the key it is stored under.
#[derive(Debug, Clone)]
pub struct CouponCreate {
    pub discount: f64,
    pub description: String,
    pub expires_at: ExpiresAt,
}

fn discount_in_range(discount: f64) -> bool {
    discount.is_finite() && discount > 0.0 && discount <= 100.0
}

impl CouponCreate {
    pub fn validate(&self) -> Result<(), CouponError> {
        if !discount_in_range(self.discount) {
            return Err(CouponError::Validation(format!(
                "discount must be within (0, 100], got {}",
                self.discount
            )));
        }
        if matches!(&self.expires_at, ExpiresAt::Text(text) if text.trim().is_empty()) {
            return Err(CouponError::Validation("expiry date is required".to_string()));
        }
        self.expires_at.to_timestamp().map(|_| ())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CouponPatch {
    pub discount: Option<f64>,
    pub description: Option<String>,
    pub expires_at: Option<ExpiresAt>,
}
