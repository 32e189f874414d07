// Time-of-day gating for incoming messages.

pub mod activity_gate;

pub use activity_gate::*;
