//! Domain types shared across all NomNom services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod delivery;
pub mod order;
pub mod pagination;
pub mod profile;
pub mod review;
pub mod user;
