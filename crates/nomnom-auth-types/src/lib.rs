//! Auth types shared across NomNom services.
//!
//! Provides session-token validation, the session cookie builders, and the
//! `IdentityHeaders` extractor.

pub mod cookie;
pub mod identity;
pub mod token;
