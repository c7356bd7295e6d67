use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::gateway::{GatewayError, NotificationGateway};

/// `[notifications]` table of `taxvault.toml`.
///
/// | backend  | target                                |
/// |----------|---------------------------------------|
/// | `log`    | ignored                               |
/// | `outbox` | path of the JSON-lines file to append |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub backend: String,
    pub target: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: "log".to_string(),
            target: None,
        }
    }
}

/// Builds the gateway named by [`GatewayConfig::backend`].
#[async_trait]
pub trait GatewayFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn NotificationGateway>, GatewayError>;
}

/// The delivery backends the CLI can pick from.
#[derive(Default)]
pub struct GatewayRegistry {
    factories: Vec<Box<dyn GatewayFactory>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`; a later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn GatewayFactory>,
    ) {
        self.factories
            .retain(|existing| existing.backend_name() != factory.backend_name());
        self.factories.push(factory);
    }

    /// Backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.iter().map(|f| f.backend_name()).collect();
        names.sort_unstable();
        names
    }

    /// Sets up the gateway `config` asks for.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Configuration`] for a backend nobody registered, or
    /// whatever that backend's factory reports.
    pub async fn create(
        &self,
        config: &GatewayConfig,
    ) -> Result<Box<dyn NotificationGateway>, GatewayError> {
        let Some(factory) = self
            .factories
            .iter()
            .find(|f| f.backend_name() == config.backend)
        else {
            return Err(GatewayError::Configuration(format!(
                "unknown backend '{}'; available: {:?}",
                config.backend,
                self.available_backends()
            )));
        };

        tracing::debug!(backend = %config.backend, "creating notification gateway");
        factory.create(config).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::{GatewayConfig, GatewayError, GatewayFactory, GatewayRegistry, NotificationGateway};
    use crate::gateway::DeliveryReceipt;
    use crate::notification::Notification;

    // ── stub gateway ─────────────────────────────────────────────────────
    struct StubGateway(&'static str);

    #[async_trait]
    impl NotificationGateway for StubGateway {
        fn backend_name(&self) -> &'static str {
            self.0
        }

        async fn send(
            &self,
            notification: &Notification,
        ) -> Result<DeliveryReceipt, GatewayError> {
            Ok(DeliveryReceipt {
                id: "stub".to_string(),
                backend: self.0.to_string(),
                channel: notification.channel,
                recipient: notification.recipient.clone(),
                demo: true,
                accepted_at: Utc::now(),
            })
        }
    }

    // ── stub factory ─────────────────────────────────────────────────────
    /// Flips `called` so tests can prove `create` was reached.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl GatewayFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }

        async fn create(
            &self,
            _config: &GatewayConfig,
        ) -> Result<Box<dyn NotificationGateway>, GatewayError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubGateway(self.name)))
        }
    }

    struct FailingFactory;

    #[async_trait]
    impl GatewayFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        async fn create(
            &self,
            _config: &GatewayConfig,
        ) -> Result<Box<dyn NotificationGateway>, GatewayError> {
            Err(GatewayError::Delivery("intentional failure".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn GatewayFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config(backend: &str) -> GatewayConfig {
        GatewayConfig {
            backend: backend.to_string(),
            target: None,
        }
    }

    // ── GatewayConfig ────────────────────────────────────────────────────
    #[test]
    fn default_config_is_log_backend() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.backend, "log");
        assert_eq!(cfg.target, None);
    }

    // ── registration ─────────────────────────────────────────────────────
    #[test]
    fn new_registry_has_no_backends() {
        assert!(GatewayRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = GatewayRegistry::new();
        let (f1, _) = stub_factory("outbox");
        let (f2, _) = stub_factory("log");
        reg.register(f1);
        reg.register(f2);
        assert_eq!(reg.available_backends(), vec!["log", "outbox"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = GatewayRegistry::new();
        let (old, _) = stub_factory("log");
        let (new, _) = stub_factory("log");
        reg.register(old);
        reg.register(new);
        assert_eq!(reg.available_backends(), vec!["log"]);
    }

    // ── dispatch ─────────────────────────────────────────────────────────
    #[tokio::test]
    async fn create_calls_only_the_matching_factory() {
        let mut reg = GatewayRegistry::new();
        let (log_factory, log_called) = stub_factory("log");
        let (outbox_factory, outbox_called) = stub_factory("outbox");
        reg.register(log_factory);
        reg.register(outbox_factory);

        let gateway = reg.create(&config("log")).await.unwrap();

        assert_eq!(gateway.backend_name(), "log");
        assert!(log_called.load(Ordering::SeqCst));
        assert!(!outbox_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_names_requested_and_available() {
        let mut reg = GatewayRegistry::new();
        let (f, _) = stub_factory("log");
        reg.register(f);

        match reg.create(&config("twilio")).await {
            Err(GatewayError::Configuration(msg)) => {
                assert!(msg.contains("twilio"), "error should name the requested backend");
                assert!(msg.contains("log"), "error should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a gateway"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = GatewayRegistry::new();
        reg.register(Box::new(FailingFactory));

        assert_eq!(
            reg.create(&config("failing")).await.err(),
            Some(GatewayError::Delivery("intentional failure".to_string()))
        );
    }
}
