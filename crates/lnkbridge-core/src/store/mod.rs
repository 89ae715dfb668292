//! The shortcut persistence façade.
//!
//! [`ShortcutStore`] is the one entry point for creating, updating, and
//! reading back shortcut objects. Save is create-or-update: when an object
//! already exists at the identity path, its current values serve as
//! defaults for every field the caller left unset. Load reads every field
//! back, aborting on the first field that cannot be read rather than
//! returning a partial record.
//!
//! Each call acquires and releases its own OS service binding; neither a
//! COM apartment nor an interface pointer survives from one call to the
//! next.

#[cfg(not(windows))]
mod desktop_entry;
#[cfg(windows)]
mod shell_com;

#[cfg(not(windows))]
use self::desktop_entry as backend;
#[cfg(windows)]
use self::shell_com as backend;

use tracing::debug;

use crate::config::StoreConfig;
use crate::encoding::TextCodec;
use crate::error::{LinkError, Result};
use crate::identity;
use crate::record::{RecordAccessor, ShortcutRecord};
use crate::special_folder;

/// Persistence façade for shell shortcut objects.
#[derive(Debug, Clone, Default)]
pub struct ShortcutStore {
    config: StoreConfig,
}

impl ShortcutStore {
    /// Create a store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with an explicit configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn codec(&self) -> TextCodec {
        TextCodec::new(self.config.text_encoding)
    }

    /// Create or update the shortcut described by `record`.
    ///
    /// `folder` and `name` must be set and non-empty. Fields left unset
    /// keep whatever the existing object stored; the commit overwrites the
    /// object at the identity path.
    pub fn save(&self, record: &ShortcutRecord) -> Result<()> {
        let folder = required(&record.folder, "folder")?;
        let name = required(&record.name, "name")?;
        let identity = identity::compose_identity(&self.codec(), folder, name)?;

        debug!(path = %identity.display(), "saving shortcut");
        backend::save(&identity, record)
    }

    /// Save an opaque caller record through [`RecordAccessor`].
    pub fn save_record<R: RecordAccessor>(&self, record: &R) -> Result<()> {
        self.save(&ShortcutRecord::from_accessor(record))
    }

    /// Read the shortcut persisted for a folder/name pair.
    ///
    /// The returned record has every field filled: stored values where the
    /// object has them, empty values where it does not. A field that
    /// cannot be read fails the whole load.
    pub fn load(&self, folder: &str, name: &str) -> Result<ShortcutRecord> {
        let identity = identity::compose_identity(&self.codec(), folder, name)?;

        debug!(path = %identity.display(), "loading shortcut");
        let mut record = backend::load(&identity)?;
        record.fill_missing();
        record.folder = Some(folder.to_owned());
        record.name = Some(name.to_owned());
        Ok(record)
    }

    /// Load into an opaque caller record through [`RecordAccessor`].
    pub fn load_into<R: RecordAccessor>(
        &self,
        folder: &str,
        name: &str,
        record: &mut R,
    ) -> Result<()> {
        self.load(folder, name)?.apply_to(record);
        Ok(())
    }

    /// Resolve a special-folder token to a directory path.
    ///
    /// Total by contract: unknown tokens and host-side misses come back as
    /// the empty string, never an error.
    pub fn resolve_special_folder(&self, token: &str) -> String {
        special_folder::resolve_special_folder(token)
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LinkError::MissingField { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_requires_identity_fields() {
        let store = ShortcutStore::new();

        let record = ShortcutRecord::new();
        let err = store.save(&record).unwrap_err();
        assert!(matches!(err, LinkError::MissingField { field: "folder" }));

        let record = ShortcutRecord::for_location("/desk", "");
        let err = store.save(&record).unwrap_err();
        assert!(matches!(err, LinkError::MissingField { field: "name" }));
    }

    #[test]
    fn test_load_requires_identity_fields() {
        let store = ShortcutStore::new();
        let err = store.load("", "editor").unwrap_err();
        assert!(matches!(err, LinkError::MissingField { field: "folder" }));
    }

    #[test]
    fn test_load_of_missing_object_fails() {
        let store = ShortcutStore::new();
        let err = store.load("/nonexistent-folder-for-test", "missing").unwrap_err();
        assert!(matches!(err, LinkError::Io { .. }));
    }
}
