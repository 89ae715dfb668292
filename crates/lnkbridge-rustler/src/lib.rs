//! Rustler NIFs for lnkbridge.
//!
//! This crate provides Elixir/Erlang bindings for the lnkbridge shortcut
//! store via Rustler NIFs (Native Implemented Functions).
//!
//! # Usage in Elixir
//!
//! ```elixir
//! defmodule LnkBridge.Native do
//!   use Rustler, otp_app: :lnkbridge, crate: "lnkbridge_rustler"
//!
//!   # NIFs will be loaded here
//!   def version(), do: :erlang.nif_error(:nif_not_loaded)
//!   def save_shortcut(_record), do: :erlang.nif_error(:nif_not_loaded)
//!   def load_shortcut(_folder, _name), do: :erlang.nif_error(:nif_not_loaded)
//!   def special_folder(_key), do: :erlang.nif_error(:nif_not_loaded)
//! end
//! ```

use lnkbridge::{Result, ShortcutRecord, ShortcutStore, StoreConfig, TextEncoding};
use rustler::NifStruct;

// ============================================================================
// NIF Structs
// ============================================================================

/// Shortcut record as an Elixir struct.
#[derive(NifStruct)]
#[module = "LnkBridge.ShortcutRecord"]
pub struct ElixirShortcutRecord {
    pub folder: String,
    pub name: String,
    pub description: Option<String>,
    pub path: Option<String>,
    pub arguments: Option<String>,
    pub working_directory: Option<String>,
    pub icon_location: Option<String>,
    pub icon_index: Option<i32>,
}

/// Base response as an Elixir struct.
#[derive(NifStruct)]
#[module = "LnkBridge.BaseResponse"]
pub struct ElixirBaseResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// Load response as an Elixir struct.
#[derive(NifStruct)]
#[module = "LnkBridge.LoadResponse"]
pub struct ElixirLoadResponse {
    pub success: bool,
    pub error: Option<String>,
    pub record: Option<ElixirShortcutRecord>,
}

// ============================================================================
// Pure Logic (testable without NIF runtime)
// ============================================================================

/// Build a store for one call. The BEAM marshals strings as UTF-8
/// binaries, so stores on this boundary always run the UTF-8 text
/// encoding. Constructed fresh per invocation: no handle or service
/// binding survives between NIF calls.
fn store() -> ShortcutStore {
    ShortcutStore::with_config(StoreConfig {
        text_encoding: TextEncoding::Utf8,
    })
}

fn version_impl() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_record(record: &ElixirShortcutRecord) -> ShortcutRecord {
    ShortcutRecord {
        folder: Some(record.folder.clone()),
        name: Some(record.name.clone()),
        description: record.description.clone(),
        path: record.path.clone(),
        arguments: record.arguments.clone(),
        working_directory: record.working_directory.clone(),
        icon_location: record.icon_location.clone(),
        icon_index: record.icon_index,
    }
}

fn from_record(record: ShortcutRecord) -> ElixirShortcutRecord {
    ElixirShortcutRecord {
        folder: record.folder.unwrap_or_default(),
        name: record.name.unwrap_or_default(),
        description: record.description,
        path: record.path,
        arguments: record.arguments,
        working_directory: record.working_directory,
        icon_location: record.icon_location,
        icon_index: record.icon_index,
    }
}

fn save_impl(record: &ElixirShortcutRecord) -> Result<()> {
    store().save(&to_record(record))
}

fn load_impl(folder: &str, name: &str) -> Result<ShortcutRecord> {
    store().load(folder, name)
}

/// Total lookup; the key is passed through verbatim (lowercase-only by
/// contract, no normalization on the native side).
fn special_folder_impl(key: &str) -> String {
    store().resolve_special_folder(key)
}

// ============================================================================
// NIF Wrappers (delegate to pure logic)
// ============================================================================

/// Get the version of the lnkbridge-rustler bindings.
#[rustler::nif]
fn version() -> String {
    version_impl()
}

/// Create or update a shortcut. Blocking filesystem work, so scheduled on
/// a dirty IO thread.
#[rustler::nif(schedule = "DirtyIo")]
fn save_shortcut(record: ElixirShortcutRecord) -> ElixirBaseResponse {
    match save_impl(&record) {
        Ok(()) => ElixirBaseResponse {
            success: true,
            error: None,
        },
        Err(e) => ElixirBaseResponse {
            success: false,
            error: Some(e.to_string()),
        },
    }
}

/// Read a shortcut back into a fully populated record.
#[rustler::nif(schedule = "DirtyIo")]
fn load_shortcut(folder: String, name: String) -> ElixirLoadResponse {
    match load_impl(&folder, &name) {
        Ok(record) => ElixirLoadResponse {
            success: true,
            error: None,
            record: Some(from_record(record)),
        },
        Err(e) => ElixirLoadResponse {
            success: false,
            error: Some(e.to_string()),
            record: None,
        },
    }
}

/// Resolve a special-folder key to a path; empty string on any miss.
#[rustler::nif]
fn special_folder(key: String) -> String {
    special_folder_impl(&key)
}

// ============================================================================
// Rustler Init
// ============================================================================

rustler::init!("Elixir.LnkBridge.Native");

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(folder: &str) -> ElixirShortcutRecord {
        ElixirShortcutRecord {
            folder: folder.to_string(),
            name: "editor".to_string(),
            description: Some("Launch the editor".to_string()),
            path: Some("/usr/bin/editor".to_string()),
            arguments: None,
            working_directory: None,
            icon_location: None,
            icon_index: None,
        }
    }

    #[test]
    fn test_version() {
        assert!(!version_impl().is_empty());
    }

    #[test]
    fn test_special_folder_is_total() {
        assert_eq!(special_folder_impl("not_a_real_key"), "");
        assert_eq!(special_folder_impl("DESKTOP"), "");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let folder = dir.path().to_string_lossy().into_owned();

        save_impl(&sample_record(&folder)).unwrap();
        let loaded = load_impl(&folder, "editor").unwrap();
        assert_eq!(loaded.description.as_deref(), Some("Launch the editor"));
        assert_eq!(loaded.path.as_deref(), Some("/usr/bin/editor"));
    }

    #[test]
    fn test_save_with_empty_identity_reports_failure() {
        let mut record = sample_record("");
        record.folder = String::new();
        assert!(save_impl(&record).is_err());
    }
}
