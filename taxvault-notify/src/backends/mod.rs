mod logging;
mod outbox;

pub use logging::{LoggingGateway, LoggingGatewayFactory};
pub use outbox::{OutboxGateway, OutboxGatewayFactory, OutboxRecord};
