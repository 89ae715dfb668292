//! Shell shortcut persistence for managed-runtime callers.
//!
//! This crate wraps the host platform's own shortcut facility behind a
//! small store: create-or-update ([`ShortcutStore::save`]), read-back
//! ([`ShortcutStore::load`]), and special-folder lookup
//! ([`ShortcutStore::resolve_special_folder`]). On Windows the persisted
//! artifact is a `.lnk` object written through the shell's COM
//! interfaces; elsewhere it is an XDG desktop entry. In both cases the
//! format belongs to the platform: compatibility means the object round
//! trips through the same OS facility, not through a custom byte layout.
//!
//! The managed-runtime boundary (Rustler NIFs for the BEAM) lives in the
//! `lnkbridge_rustler` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use lnkbridge::{ShortcutRecord, ShortcutStore};
//!
//! fn main() -> lnkbridge::Result<()> {
//!     let store = ShortcutStore::new();
//!
//!     let mut record = ShortcutRecord::for_location("/home/me/Desktop", "editor");
//!     record.set_path("/usr/bin/editor");
//!     record.description = Some("Launch the editor".into());
//!     store.save(&record)?;
//!
//!     let loaded = store.load("/home/me/Desktop", "editor")?;
//!     assert_eq!(loaded.description.as_deref(), Some("Launch the editor"));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod identity;
pub mod record;
pub mod special_folder;
pub mod store;

// Re-export commonly used types
pub use config::{StoreConfig, TextEncoding};
pub use encoding::TextCodec;
pub use error::{LinkError, Result};
pub use record::{RecordAccessor, ShortcutRecord};
pub use special_folder::{resolve_special_folder, SpecialFolderKey};
pub use store::ShortcutStore;
