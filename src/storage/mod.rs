//! Durable key/value storage for credentials.
//!
//! The session writes through [`CredentialStore`] and never reads back what
//! it wrote; route guards outside this crate consume the keys.

mod file_store;
mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "userRole";
pub const REMEMBERED_EMAIL_KEY: &str = "rememberedEmail";

pub trait CredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Last write wins.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
