// src/config/mod.rs
pub mod badges;
pub mod consts;
pub mod options;

pub use badges::{BadgeRule, BadgeStatus, BadgeTable};
pub use options::{AppOptions, PortalOptions, Requirements};
