//! Implementations of geographic points and projections.

/// Geographic point type.
pub mod point;
pub mod projection;
