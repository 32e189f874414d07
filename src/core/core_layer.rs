// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "activity/mod.rs"]
pub mod activity;

#[path = "moderation/mod.rs"]
pub mod moderation;
