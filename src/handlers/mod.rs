//! HTTP handlers

pub mod cei;
pub mod employment;
pub mod health;
pub mod home;
pub mod ml;
pub mod risk;
