// Core moderation module - holds group messages until an admin decides.
// Dispatcher and resolver share one service type; the store and the
// transport are injected through the ports.

pub mod approval_resolver;
pub mod moderation_models;
pub mod moderation_ports;
pub mod moderation_service;

#[cfg(test)]
pub mod test_support;

pub use moderation_models::*;
pub use moderation_ports::*;
pub use moderation_service::*;
