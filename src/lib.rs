pub mod catalog;
pub mod config;
pub mod data_types;
pub mod function;
pub mod identifier;
pub mod provider;
pub mod session;
pub mod utils;

pub use session::SessionCatalog;

#[cfg(test)]
pub(crate) mod testutils;
