use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notification::{Channel, Notification};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Proof that a gateway accepted a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
    pub backend: String,
    pub channel: Channel,
    pub recipient: String,
    /// Set by gateways that never leave the process.
    pub demo: bool,
    pub accepted_at: DateTime<Utc>,
}

/// Somewhere notifications can be delivered.
///
/// One implementation per delivery mechanism; the application picks one at
/// startup through a [`GatewayRegistry`](crate::GatewayRegistry) and holds it
/// as `Box<dyn NotificationGateway>`.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn send(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReceipt, GatewayError>;
}
