pub mod error;
pub mod frames;
pub mod loader;
pub mod provider;
pub mod records;
