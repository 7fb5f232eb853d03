//! Cross-cutting pieces every NomNom HTTP service mounts: the JSON error
//! envelope, health checks, request ids and the tracing subscriber.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
