// Implementations of the moderation ports.

pub mod in_memory;
pub mod telegram_gateway;

pub use in_memory::InMemoryPendingStore;
pub use telegram_gateway::TelegramGateway;
