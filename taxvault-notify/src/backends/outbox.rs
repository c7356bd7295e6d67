use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::factory::{GatewayConfig, GatewayFactory};
use crate::gateway::{DeliveryReceipt, GatewayError, NotificationGateway};
use crate::notification::Notification;

/// One line of the outbox file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxRecord {
    pub id: Uuid,
    pub queued_at: DateTime<Utc>,
    #[serde(flatten)]
    pub notification: Notification,
}

/// Appends every notification to a JSON-lines file for a separate sender
/// process to pick up.
#[derive(Debug)]
pub struct OutboxGateway {
    path: PathBuf,
    file: Mutex<File>,
}

impl OutboxGateway {
    /// Opens `path` for appending, creating it if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| GatewayError::Io(format!("{}: {e}", path.display())))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl NotificationGateway for OutboxGateway {
    fn backend_name(&self) -> &'static str {
        "outbox"
    }

    async fn send(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReceipt, GatewayError> {
        let record = OutboxRecord {
            id: Uuid::new_v4(),
            queued_at: Utc::now(),
            notification: notification.clone(),
        };
        let mut line = serde_json::to_string(&record)
            .map_err(|e| GatewayError::Delivery(format!("serializing notification: {e}")))?;
        line.push('\n');

        {
            let mut file = self.file.lock().await;
            file.write_all(line.as_bytes()).await?;
            file.flush().await?;
        }

        info!(
            id = %record.id,
            channel = %notification.channel,
            outbox = %self.path.display(),
            "notification queued"
        );

        Ok(DeliveryReceipt {
            id: record.id.to_string(),
            backend: self.backend_name().to_string(),
            channel: notification.channel,
            recipient: notification.recipient.clone(),
            demo: false,
            accepted_at: record.queued_at,
        })
    }
}

pub struct OutboxGatewayFactory;

#[async_trait]
impl GatewayFactory for OutboxGatewayFactory {
    fn backend_name(&self) -> &'static str {
        "outbox"
    }

    async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn NotificationGateway>, GatewayError> {
        let target = config
            .target
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::Configuration("outbox backend needs a target file".to_string())
            })?;

        Ok(Box::new(OutboxGateway::open(target).await?))
    }
}
