//! Relatos Geo - Distance and radius predicates
//!
//! This crate decides whether a coordinate lies within a given radius of
//! another, and checks coordinates for sanity before they reach the registry.

pub mod distance;
pub mod validation;

pub use distance::{distance_km, within_radius, DEFAULT_RADIUS_KM};
