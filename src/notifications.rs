//! User-facing notifications.
//!
//! Every outcome a person should see goes through a [`Notifier`]: it is logged
//! with `tracing` and, when a consumer is attached, forwarded on a channel.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::checkout::CartError;
use crate::coupon_actor::CouponError;
use crate::order_actor::OrderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "green",
            Severity::Info => "blue",
            Severity::Warning => "orange",
            Severity::Error => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }
}

impl From<&CartError> for Notification {
    fn from(e: &CartError) -> Self {
        match e {
            CartError::InvalidCoupon(_) | CartError::Coupon(CouponError::NotFound(_)) => {
                Notification::error("Cupón Inválido", "El código ingresado no es válido.")
            }
            CartError::ExpiredCoupon(_) => {
                Notification::error("Cupón Expirado", "Este cupón ya no está vigente.")
            }
            CartError::CommentTooLong { .. } => Notification::error(
                "Comentario muy largo",
                "Los comentarios no pueden superar los 100 caracteres.",
            ),
            CartError::AuthRequired => {
                Notification::error("Error", "Inicia sesión para confirmar tu pedido.")
            }
            CartError::NotAClient(_) => {
                Notification::error("Error", "Solo los clientes pueden realizar pedidos.")
            }
            CartError::Empty => Notification::new(
                Severity::Warning,
                "Carrito vacío",
                "Agrega productos antes de confirmar.",
            ),
            CartError::InvalidQuantity(_) => {
                Notification::new(Severity::Warning, "Cantidad inválida", "La cantidad mínima es 1.")
            }
            CartError::Unavailable(_) => Notification::new(
                Severity::Warning,
                "No disponible",
                "Este producto no está disponible por ahora.",
            ),
            CartError::Order(OrderError::ActorCommunicationError(_))
            | CartError::Coupon(CouponError::ActorCommunicationError(_)) => {
                Notification::error("Error", "No se pudo contactar al servidor. Intenta de nuevo.")
            }
            other => Notification::error("Error", other.to_string()),
        }
    }
}

/// Cloneable handle used to emit notifications.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    sender: Option<mpsc::UnboundedSender<Notification>>,
}

impl Notifier {
    /// A notifier whose notifications can be read from the returned receiver.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender: Some(sender) }, receiver)
    }

    /// A notifier that only logs.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success | Severity::Info => {
                info!(title = %notification.title, message = %notification.message, "Notification")
            }
            Severity::Warning => {
                warn!(title = %notification.title, message = %notification.message, "Notification")
            }
            Severity::Error => {
                error!(title = %notification.title, message = %notification.message, "Notification")
            }
        }

        if let Some(sender) = &self.sender {
            if sender.send(notification).is_err() {
                warn!("Notification receiver dropped");
            }
        }
    }
}
