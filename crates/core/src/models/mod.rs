//! Data models for the cafe directory

mod cafe;
mod rating;
mod review;

pub use cafe::*;
pub use rating::*;
pub use review::*;
