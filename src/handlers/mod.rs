//! HTTP handlers for the store server and the pass-through proxy.

pub mod proxy;
pub mod resource;
