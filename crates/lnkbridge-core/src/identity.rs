//! Identity path composition for persisted shortcuts.
//!
//! A shortcut's identity is `folder` + separator + `name` + the platform
//! shortcut extension. Composition is deterministic and validated before
//! any shell service is touched: both identity fields must be non-empty,
//! and the encoded path (with its trailing NUL) must fit `MAX_PATH`.
//! Over-long identities are a hard error, never truncated.

use std::path::{PathBuf, MAIN_SEPARATOR};

use crate::encoding::TextCodec;
use crate::error::{LinkError, Result};

/// Maximum encoded length of an identity path, including the terminating
/// NUL. Mirrors the Win32 `MAX_PATH` limit on every platform.
pub const MAX_IDENTITY_LEN: usize = 260;

/// File extension for persisted shortcut objects on this platform.
pub const fn shortcut_extension() -> &'static str {
    #[cfg(windows)]
    {
        "lnk"
    }
    #[cfg(not(windows))]
    {
        "desktop"
    }
}

/// Compose the identity path for a folder/name pair.
pub fn compose_identity(codec: &TextCodec, folder: &str, name: &str) -> Result<PathBuf> {
    if folder.is_empty() {
        return Err(LinkError::MissingField { field: "folder" });
    }
    if name.is_empty() {
        return Err(LinkError::MissingField { field: "name" });
    }

    let composed = format!(
        "{folder}{MAIN_SEPARATOR}{name}.{ext}",
        ext = shortcut_extension()
    );
    let length = codec.encoded_len(&composed)? + 1;
    if length > MAX_IDENTITY_LEN {
        return Err(LinkError::IdentityTooLong {
            length,
            max: MAX_IDENTITY_LEN,
        });
    }
    Ok(PathBuf::from(composed))
}
