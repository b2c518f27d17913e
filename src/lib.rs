// Public modules
pub mod chat;
pub mod client;
pub mod documents;
pub mod error;
pub mod observability;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{BuddyClient, Transport};
pub use documents::{DocumentRegistry, RegistryEvent, SUPPORTED_EXTENSIONS, UploadTiming};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use types::*;
