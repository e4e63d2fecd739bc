//! Application layer - Cross-service workflow orchestration
//!
//! Contains the capability ports each collaborating service must satisfy,
//! the cancellable execution context threaded through every step, and the
//! three orchestrators that sequence those collaborators into business
//! transactions no single service owns.

pub mod error;
pub mod flow_context;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use flow_context::{CancelHandle, FlowContext};
pub use ports::*;
pub use services::*;
