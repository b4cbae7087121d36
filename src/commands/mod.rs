//! Backend Command Wrappers
//!
//! HTTP bindings to the ingredient endpoints of the kitchen backend.

mod ingredient;

pub use ingredient::HttpGateway;
