//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound router ports.

mod in_memory_router;
mod json_rpc_router;

pub use in_memory_router::{InMemoryRouter, InMemoryRouterFactory};
pub use json_rpc_router::{JsonRpcRouter, JsonRpcRouterFactory};
