//! The shortcut record and by-name field access.
//!
//! A [`ShortcutRecord`] is transient per-call state: the store reads it on
//! save, fills a fresh one on load, and never retains a reference across
//! calls. Callers with their own record representation (a map, a managed
//! object) plug in through [`RecordAccessor`] instead of converting by
//! hand.

use std::path::Path;

/// Field names understood by [`RecordAccessor`] implementations.
pub mod fields {
    pub const FOLDER: &str = "folder";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const PATH: &str = "path";
    pub const ARGUMENTS: &str = "arguments";
    pub const WORKING_DIRECTORY: &str = "working_directory";
    pub const ICON_LOCATION: &str = "icon_location";
    pub const ICON_INDEX: &str = "icon_index";
}

/// By-name access to a shortcut-shaped record.
///
/// The store reads and writes opaque caller records exclusively through
/// this interface; whether the backing storage is a struct, a map, or a
/// managed-runtime object is the caller's business. Unknown field names
/// are ignored on set and report `None` on get.
pub trait RecordAccessor {
    fn get_text(&self, field: &str) -> Option<&str>;
    fn set_text(&mut self, field: &str, value: &str);
    fn get_int(&self, field: &str) -> Option<i32>;
    fn set_int(&mut self, field: &str, value: i32);
}

/// A shell shortcut as a flat record of optional fields.
///
/// `folder` and `name` locate the persisted object; every other field left
/// unset means "keep the stored value" on save and is reported as the
/// stored value (or empty) on load. `icon_index` only means something
/// paired with `icon_location`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutRecord {
    pub folder: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
    pub arguments: Option<String>,
    pub working_directory: Option<String>,
    pub icon_location: Option<String>,
    pub icon_index: Option<i32>,
}

impl ShortcutRecord {
    /// Create a record with no values filled in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record for a specific persisted location.
    pub fn for_location(folder: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            folder: Some(folder.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the target path. When no working directory has been chosen yet,
    /// the parent directory of the target is used, matching what the shell
    /// itself defaults to for a launched shortcut.
    pub fn set_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        if self.working_directory.is_none() {
            self.working_directory = Path::new(&path)
                .parent()
                .map(|p| p.to_string_lossy().into_owned());
        }
        self.path = Some(path);
    }

    /// Build a record by reading every known field from an opaque accessor.
    pub fn from_accessor(accessor: &impl RecordAccessor) -> Self {
        let text = |field| accessor.get_text(field).map(str::to_owned);
        Self {
            folder: text(fields::FOLDER),
            name: text(fields::NAME),
            description: text(fields::DESCRIPTION),
            path: text(fields::PATH),
            arguments: text(fields::ARGUMENTS),
            working_directory: text(fields::WORKING_DIRECTORY),
            icon_location: text(fields::ICON_LOCATION),
            icon_index: accessor.get_int(fields::ICON_INDEX),
        }
    }

    /// Write every set field of this record into an opaque accessor.
    pub fn apply_to(&self, accessor: &mut impl RecordAccessor) {
        for (field, value) in [
            (fields::FOLDER, &self.folder),
            (fields::NAME, &self.name),
            (fields::DESCRIPTION, &self.description),
            (fields::PATH, &self.path),
            (fields::ARGUMENTS, &self.arguments),
            (fields::WORKING_DIRECTORY, &self.working_directory),
            (fields::ICON_LOCATION, &self.icon_location),
        ] {
            if let Some(value) = value {
                accessor.set_text(field, value);
            }
        }
        if let Some(index) = self.icon_index {
            accessor.set_int(fields::ICON_INDEX, index);
        }
    }

    /// Overlay this record on stored defaults: fields set here win, fields
    /// left unset keep the default. Identity fields come from `self`.
    pub fn merged_over(&self, defaults: &ShortcutRecord) -> ShortcutRecord {
        let pick = |ours: &Option<String>, theirs: &Option<String>| {
            ours.clone().or_else(|| theirs.clone())
        };
        ShortcutRecord {
            folder: self.folder.clone(),
            name: self.name.clone(),
            description: pick(&self.description, &defaults.description),
            path: pick(&self.path, &defaults.path),
            arguments: pick(&self.arguments, &defaults.arguments),
            working_directory: pick(&self.working_directory, &defaults.working_directory),
            icon_location: pick(&self.icon_location, &defaults.icon_location),
            icon_index: self.icon_index.or(defaults.icon_index),
        }
    }

    /// Fill every unset field with the empty value a load reports when the
    /// stored object lacks one.
    pub fn fill_missing(&mut self) {
        for field in [
            &mut self.description,
            &mut self.path,
            &mut self.arguments,
            &mut self.working_directory,
            &mut self.icon_location,
        ] {
            field.get_or_insert_with(String::new);
        }
        self.icon_index.get_or_insert(0);
    }
}

impl RecordAccessor for ShortcutRecord {
    fn get_text(&self, field: &str) -> Option<&str> {
        let slot = match field {
            fields::FOLDER => &self.folder,
            fields::NAME => &self.name,
            fields::DESCRIPTION => &self.description,
            fields::PATH => &self.path,
            fields::ARGUMENTS => &self.arguments,
            fields::WORKING_DIRECTORY => &self.working_directory,
            fields::ICON_LOCATION => &self.icon_location,
            _ => return None,
        };
        slot.as_deref()
    }

    fn set_text(&mut self, field: &str, value: &str) {
        let slot = match field {
            fields::FOLDER => &mut self.folder,
            fields::NAME => &mut self.name,
            fields::DESCRIPTION => &mut self.description,
            fields::PATH => &mut self.path,
            fields::ARGUMENTS => &mut self.arguments,
            fields::WORKING_DIRECTORY => &mut self.working_directory,
            fields::ICON_LOCATION => &mut self.icon_location,
            _ => return,
        };
        *slot = Some(value.to_owned());
    }

    fn get_int(&self, field: &str) -> Option<i32> {
        match field {
            fields::ICON_INDEX => self.icon_index,
            _ => None,
        }
    }

    fn set_int(&mut self, field: &str, value: i32) {
        if field == fields::ICON_INDEX {
            self.icon_index = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Map-backed record standing in for an opaque managed object.
    #[derive(Default)]
    struct MapRecord {
        text: HashMap<String, String>,
        ints: HashMap<String, i32>,
    }

    impl RecordAccessor for MapRecord {
        fn get_text(&self, field: &str) -> Option<&str> {
            self.text.get(field).map(String::as_str)
        }

        fn set_text(&mut self, field: &str, value: &str) {
            self.text.insert(field.to_owned(), value.to_owned());
        }

        fn get_int(&self, field: &str) -> Option<i32> {
            self.ints.get(field).copied()
        }

        fn set_int(&mut self, field: &str, value: i32) {
            self.ints.insert(field.to_owned(), value);
        }
    }

    #[test]
    fn test_set_path_defaults_working_directory() {
        let mut record = ShortcutRecord::new();
        record.set_path("/opt/editor/bin/editor");
        assert_eq!(record.working_directory.as_deref(), Some("/opt/editor/bin"));

        // An explicit working directory is never overwritten.
        let mut record = ShortcutRecord::new();
        record.working_directory = Some("/var/tmp".into());
        record.set_path("/opt/editor/bin/editor");
        assert_eq!(record.working_directory.as_deref(), Some("/var/tmp"));
    }

    #[test]
    fn test_accessor_round_trip_through_map() {
        let mut map = MapRecord::default();
        map.set_text(fields::FOLDER, "/home/me/Desktop");
        map.set_text(fields::NAME, "editor");
        map.set_text(fields::DESCRIPTION, "Launch the editor");
        map.set_int(fields::ICON_INDEX, 3);

        let record = ShortcutRecord::from_accessor(&map);
        assert_eq!(record.folder.as_deref(), Some("/home/me/Desktop"));
        assert_eq!(record.description.as_deref(), Some("Launch the editor"));
        assert_eq!(record.icon_index, Some(3));
        assert_eq!(record.path, None);

        let mut out = MapRecord::default();
        record.apply_to(&mut out);
        assert_eq!(out.get_text(fields::NAME), Some("editor"));
        assert_eq!(out.get_int(fields::ICON_INDEX), Some(3));
        assert_eq!(out.get_text(fields::PATH), None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut record = ShortcutRecord::new();
        record.set_text("hotkey", "ctrl+e");
        record.set_int("show_command", 1);
        assert_eq!(record.get_text("hotkey"), None);
        assert_eq!(record.get_int("show_command"), None);
        assert_eq!(record, ShortcutRecord::new());
    }

    #[test]
    fn test_merged_over_keeps_stored_defaults() {
        let mut stored = ShortcutRecord::new();
        stored.path = Some("/usr/bin/editor".into());
        stored.arguments = Some("--fast".into());
        stored.icon_index = Some(2);

        let mut update = ShortcutRecord::for_location("/desk", "editor");
        update.description = Some("new description".into());

        let merged = update.merged_over(&stored);
        assert_eq!(merged.description.as_deref(), Some("new description"));
        assert_eq!(merged.path.as_deref(), Some("/usr/bin/editor"));
        assert_eq!(merged.arguments.as_deref(), Some("--fast"));
        assert_eq!(merged.icon_index, Some(2));
        assert_eq!(merged.folder.as_deref(), Some("/desk"));
    }

    #[test]
    fn test_fill_missing() {
        let mut record = ShortcutRecord::new();
        record.description = Some("kept".into());
        record.fill_missing();
        assert_eq!(record.description.as_deref(), Some("kept"));
        assert_eq!(record.path.as_deref(), Some(""));
        assert_eq!(record.icon_location.as_deref(), Some(""));
        assert_eq!(record.icon_index, Some(0));
    }
}
