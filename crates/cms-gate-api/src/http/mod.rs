//! HTTP surface of the gate.

pub(crate) mod auth;
pub(crate) mod constants;
pub(crate) mod errors;
pub(crate) mod forward;
pub(crate) mod health;
pub mod router;
