//! Notifications for tax deadlines, payments and vault activity.
//!
//! Templates in [`templates`] produce a [`Notification`]; a
//! [`NotificationGateway`] chosen once at startup from a [`GatewayRegistry`]
//! delivers it.

pub mod backends;
pub mod factory;
pub mod gateway;
pub mod notification;
pub mod templates;

pub use backends::{LoggingGateway, LoggingGatewayFactory, OutboxGateway, OutboxGatewayFactory};
pub use factory::{GatewayConfig, GatewayFactory, GatewayRegistry};
pub use gateway::{DeliveryReceipt, GatewayError, NotificationGateway};
pub use notification::{Channel, Notification, TemplateError};

/// A registry with every built-in backend registered.
pub fn default_registry() -> GatewayRegistry {
    let mut registry = GatewayRegistry::new();
    registry.register(Box::new(LoggingGatewayFactory));
    registry.register(Box::new(OutboxGatewayFactory));
    registry
}
