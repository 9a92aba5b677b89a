pub mod airports;
pub mod fleet;

pub use airports::fallback_airports;
pub use fleet::fleet;
