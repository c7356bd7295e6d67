use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::factory::{GatewayConfig, GatewayFactory};
use crate::gateway::{DeliveryReceipt, GatewayError, NotificationGateway};
use crate::notification::Notification;

/// Demo gateway: writes each notification to the log and delivers nothing.
#[derive(Debug, Default)]
pub struct LoggingGateway;

#[async_trait]
impl NotificationGateway for LoggingGateway {
    fn backend_name(&self) -> &'static str {
        "log"
    }

    async fn send(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReceipt, GatewayError> {
        info!(
            channel = %notification.channel,
            recipient = %notification.recipient,
            subject = notification.subject.as_deref().unwrap_or(""),
            body = %notification.body,
            "[demo] notification not delivered"
        );

        Ok(DeliveryReceipt {
            id: format!("demo-{}", Uuid::new_v4()),
            backend: self.backend_name().to_string(),
            channel: notification.channel,
            recipient: notification.recipient.clone(),
            demo: true,
            accepted_at: Utc::now(),
        })
    }
}

pub struct LoggingGatewayFactory;

#[async_trait]
impl GatewayFactory for LoggingGatewayFactory {
    fn backend_name(&self) -> &'static str {
        "log"
    }

    async fn create(
        &self,
        _config: &GatewayConfig,
    ) -> Result<Box<dyn NotificationGateway>, GatewayError> {
        Ok(Box::new(LoggingGateway))
    }
}
