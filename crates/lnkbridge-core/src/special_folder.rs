//! Special-folder resolution.
//!
//! A small fixed set of lowercase tokens maps to well-known directories.
//! Resolution is total by contract: unknown tokens, folders the OS does
//! not provide, and registry misses all come back as the empty string,
//! never as an error. Tokens are matched case-sensitively; callers that
//! want case folding do it on their side of the boundary.

use tracing::debug;

/// Logical folder keys recognized by [`resolve_special_folder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialFolderKey {
    /// The user's desktop directory.
    Desktop,
    /// The user's documents directory.
    Personal,
    /// The user's start-menu programs directory.
    Programs,
    /// The all-users programs directory.
    CommonPrograms,
    /// The all-users desktop directory.
    CommonDesktopDirectory,
    /// The machine's program-files directory. Resolved through the
    /// registry rather than folder enumeration, which is unreliable for
    /// this one across OS versions.
    ProgramFiles,
}

impl SpecialFolderKey {
    pub fn as_token(&self) -> &'static str {
        match self {
            SpecialFolderKey::Desktop => "desktop",
            SpecialFolderKey::Personal => "personal",
            SpecialFolderKey::Programs => "programs",
            SpecialFolderKey::CommonPrograms => "common_programs",
            SpecialFolderKey::CommonDesktopDirectory => "common_desktopdirectory",
            SpecialFolderKey::ProgramFiles => "program_files",
        }
    }

    /// Parse a token. Lowercase only; no normalization happens here.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "desktop" => Some(SpecialFolderKey::Desktop),
            "personal" => Some(SpecialFolderKey::Personal),
            "programs" => Some(SpecialFolderKey::Programs),
            "common_programs" => Some(SpecialFolderKey::CommonPrograms),
            "common_desktopdirectory" => Some(SpecialFolderKey::CommonDesktopDirectory),
            "program_files" => Some(SpecialFolderKey::ProgramFiles),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpecialFolderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

/// Resolve a special-folder token to a directory path.
///
/// Returns the empty string for unknown tokens and for folders the host
/// cannot supply; this operation never fails.
pub fn resolve_special_folder(token: &str) -> String {
    let Some(key) = SpecialFolderKey::from_token(token) else {
        debug!(token, "unrecognized special folder token");
        return String::new();
    };
    match platform::resolve(key) {
        Some(path) => path,
        None => {
            debug!(%key, "special folder not provided by this host");
            String::new()
        }
    }
}

#[cfg(windows)]
mod platform {
    //! Known-folder enumeration plus one registry-backed lookup.

    #![allow(unsafe_code)]

    use super::SpecialFolderKey;
    use windows::core::{GUID, PWSTR};
    use windows::Win32::System::Com::CoTaskMemFree;
    use windows::Win32::UI::Shell::{
        FOLDERID_CommonPrograms, FOLDERID_Desktop, FOLDERID_Documents, FOLDERID_Programs,
        FOLDERID_PublicDesktop, SHGetKnownFolderPath, KF_FLAG_DEFAULT,
    };
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    const PROGRAM_FILES_SUBKEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion";
    const PROGRAM_FILES_VALUE: &str = "ProgramFilesDir";

    pub(super) fn resolve(key: SpecialFolderKey) -> Option<String> {
        let id = match key {
            SpecialFolderKey::Desktop => FOLDERID_Desktop,
            SpecialFolderKey::Personal => FOLDERID_Documents,
            SpecialFolderKey::Programs => FOLDERID_Programs,
            SpecialFolderKey::CommonPrograms => FOLDERID_CommonPrograms,
            SpecialFolderKey::CommonDesktopDirectory => FOLDERID_PublicDesktop,
            SpecialFolderKey::ProgramFiles => return program_files_from_registry(),
        };
        known_folder(id)
    }

    /// Owns a PWSTR allocated by the shell; freed on drop.
    struct CoStr {
        pwstr: PWSTR,
    }

    impl CoStr {
        fn to_string(&self) -> Option<String> {
            // SAFETY: the shell returned a NUL-terminated wide string.
            unsafe { self.pwstr.to_string() }.ok()
        }
    }

    impl Drop for CoStr {
        fn drop(&mut self) {
            // SAFETY: the allocation came from the shell's task allocator.
            unsafe { CoTaskMemFree(Some(self.pwstr.as_ptr() as *const _)) };
        }
    }

    fn known_folder(id: GUID) -> Option<String> {
        // SAFETY: plain known-folder query; ownership of the returned
        // string is taken by CoStr immediately.
        match unsafe { SHGetKnownFolderPath(&id, KF_FLAG_DEFAULT, None) } {
            Ok(pwstr) => CoStr { pwstr }.to_string(),
            Err(_) => None,
        }
    }

    fn program_files_from_registry() -> Option<String> {
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm.open_subkey(PROGRAM_FILES_SUBKEY).ok()?;
        // A value of non-string type reads as an error here and is treated
        // as a miss, the same as an absent value.
        key.get_value::<String, _>(PROGRAM_FILES_VALUE).ok()
    }
}

#[cfg(not(windows))]
mod platform {
    //! XDG-flavored equivalents of the Windows well-known folders.

    use super::SpecialFolderKey;
    use std::path::PathBuf;

    pub(super) fn resolve(key: SpecialFolderKey) -> Option<String> {
        let path: PathBuf = match key {
            SpecialFolderKey::Desktop => dirs::desktop_dir()?,
            SpecialFolderKey::Personal => dirs::document_dir()?,
            SpecialFolderKey::Programs => dirs::data_dir()?.join("applications"),
            SpecialFolderKey::CommonPrograms => PathBuf::from("/usr/share/applications"),
            // No shared-desktop or registry equivalent on this platform;
            // both report as a miss.
            SpecialFolderKey::CommonDesktopDirectory | SpecialFolderKey::ProgramFiles => {
                return None;
            }
        };
        Some(path.to_string_lossy().into_owned())
    }
}
