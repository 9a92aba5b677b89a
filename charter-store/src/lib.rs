pub mod app_config;
pub mod portal;
pub mod seed;

pub use app_config::Config;
pub use portal::{AdminCredential, PortalError, PortalStats, PortalStore};
