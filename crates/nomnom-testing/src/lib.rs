//! Test utilities for NomNom services. Dev-dependency only.

pub mod auth;
