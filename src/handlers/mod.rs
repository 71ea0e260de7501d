//! HTTP route handlers

pub mod drivers;
pub mod health;
pub mod prices;
pub mod recommendations;
pub mod sessions;
