//! Shell COM persistence backend.
//!
//! Shortcut objects are `IShellLinkW` instances persisted through
//! `IPersistFile`. The apartment guard and both interface pointers live
//! only for the duration of one call; reusing a resolved binding across
//! calls is exactly the stale-handle hazard this module exists to avoid.

#![allow(unsafe_code)]

use std::iter;
use std::path::Path;

use tracing::debug;
use windows::core::{Interface, PCWSTR};
use windows::Win32::Storage::FileSystem::WIN32_FIND_DATAW;
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, IPersistFile, CLSCTX_INPROC_SERVER,
    COINIT_APARTMENTTHREADED, STGM_READ,
};
use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};

use crate::error::{LinkError, Result};
use crate::record::ShortcutRecord;

// MAX_PATH-sized field buffers, which is what the shell API itself caps
// these strings at.
const TEXT_BUF_LEN: usize = 260;

/// Scoped COM apartment: initialized on entry to a store call, released
/// on every exit path.
struct ComApartment;

impl ComApartment {
    fn new() -> Result<Self> {
        // SAFETY: plain COM runtime initialization, balanced by Drop.
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_err() {
            return Err(LinkError::ServiceUnavailable {
                message: format!("CoInitializeEx failed: {hr:?}"),
            });
        }
        Ok(Self)
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        // SAFETY: balances the CoInitializeEx in `new`.
        unsafe { CoUninitialize() };
    }
}

pub(crate) fn save(identity: &Path, record: &ShortcutRecord) -> Result<()> {
    let _com = ComApartment::new()?;
    let link = create_link()?;
    let persist = persist_file(&link)?;
    let wide_identity = to_wide(&identity.to_string_lossy());

    // Load-before-save: an existing object supplies the defaults for every
    // field the caller left unset.
    if identity.exists() {
        // SAFETY: NUL-terminated wide path, read-only open.
        unsafe { persist.Load(PCWSTR(wide_identity.as_ptr()), STGM_READ) }
            .map_err(|e| com_io("open existing shortcut", identity, e))?;
    }

    if let Some(ref description) = record.description {
        let text = to_wide(description);
        // SAFETY: NUL-terminated wide string outlives the call.
        unsafe { link.SetDescription(PCWSTR(text.as_ptr())) }
            .map_err(|e| com_io("set description", identity, e))?;
    }
    if let Some(ref path) = record.path {
        let text = to_wide(path);
        // SAFETY: as above.
        unsafe { link.SetPath(PCWSTR(text.as_ptr())) }
            .map_err(|e| com_io("set target path", identity, e))?;
    }
    if let Some(ref arguments) = record.arguments {
        let text = to_wide(arguments);
        // SAFETY: as above.
        unsafe { link.SetArguments(PCWSTR(text.as_ptr())) }
            .map_err(|e| com_io("set arguments", identity, e))?;
    }
    if let Some(ref working_directory) = record.working_directory {
        let text = to_wide(working_directory);
        // SAFETY: as above.
        unsafe { link.SetWorkingDirectory(PCWSTR(text.as_ptr())) }
            .map_err(|e| com_io("set working directory", identity, e))?;
    }
    // The icon index only means something next to a location, so the pair
    // is applied together.
    if let Some(ref icon_location) = record.icon_location {
        let text = to_wide(icon_location);
        // SAFETY: as above.
        unsafe { link.SetIconLocation(PCWSTR(text.as_ptr()), record.icon_index.unwrap_or(0)) }
            .map_err(|e| com_io("set icon location", identity, e))?;
    }

    // SAFETY: NUL-terminated wide path; TRUE marks the file clean.
    unsafe { persist.Save(PCWSTR(wide_identity.as_ptr()), true) }
        .map_err(|e| com_io("commit shortcut", identity, e))?;
    debug!(path = %identity.display(), "shortcut committed");
    Ok(())
}

pub(crate) fn load(identity: &Path) -> Result<ShortcutRecord> {
    let _com = ComApartment::new()?;
    let link = create_link()?;
    let persist = persist_file(&link)?;
    let wide_identity = to_wide(&identity.to_string_lossy());

    // SAFETY: NUL-terminated wide path, read-only open.
    unsafe { persist.Load(PCWSTR(wide_identity.as_ptr()), STGM_READ) }
        .map_err(|e| com_io("open shortcut", identity, e))?;

    let mut record = ShortcutRecord::default();

    let mut buf = [0u16; TEXT_BUF_LEN];
    // SAFETY: fixed-size buffer owned by this frame.
    unsafe { link.GetDescription(&mut buf) }
        .map_err(|e| com_io("read description", identity, e))?;
    record.description = Some(from_wide(&buf));

    let mut buf = [0u16; TEXT_BUF_LEN];
    let mut find_data = WIN32_FIND_DATAW::default();
    // SAFETY: buffer and find-data are owned by this frame.
    unsafe { link.GetPath(&mut buf, &mut find_data, 0) }
        .map_err(|e| com_io("read target path", identity, e))?;
    record.path = Some(from_wide(&buf));

    let mut buf = [0u16; TEXT_BUF_LEN];
    // SAFETY: as above.
    unsafe { link.GetArguments(&mut buf) }
        .map_err(|e| com_io("read arguments", identity, e))?;
    record.arguments = Some(from_wide(&buf));

    let mut buf = [0u16; TEXT_BUF_LEN];
    // SAFETY: as above.
    unsafe { link.GetWorkingDirectory(&mut buf) }
        .map_err(|e| com_io("read working directory", identity, e))?;
    record.working_directory = Some(from_wide(&buf));

    let mut buf = [0u16; TEXT_BUF_LEN];
    let mut icon_index = 0i32;
    // SAFETY: as above.
    unsafe { link.GetIconLocation(&mut buf, &mut icon_index) }
        .map_err(|e| com_io("read icon location", identity, e))?;
    record.icon_location = Some(from_wide(&buf));
    record.icon_index = Some(icon_index);

    Ok(record)
}

fn create_link() -> Result<IShellLinkW> {
    // SAFETY: standard in-proc instantiation of the shell's ShellLink
    // class; the returned interface is reference-counted by the wrapper.
    unsafe { CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER) }.map_err(|e| {
        LinkError::ServiceUnavailable {
            message: format!("CoCreateInstance(ShellLink) failed: {e}"),
        }
    })
}

fn persist_file(link: &IShellLinkW) -> Result<IPersistFile> {
    link.cast().map_err(|e| LinkError::ServiceUnavailable {
        message: format!("IPersistFile unavailable: {e}"),
    })
}

fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(iter::once(0)).collect()
}

fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

fn com_io(step: &'static str, identity: &Path, err: windows::core::Error) -> LinkError {
    LinkError::Io {
        step,
        path: Some(identity.to_path_buf()),
        source: Some(std::io::Error::other(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_string_round_trip() {
        let wide = to_wide("C:\\Users\\me\\Desktop");
        assert_eq!(wide.last(), Some(&0));
        assert_eq!(from_wide(&wide), "C:\\Users\\me\\Desktop");
    }

    #[test]
    fn test_from_wide_stops_at_nul() {
        let mut buf = [0u16; 8];
        for (i, c) in "abc".encode_utf16().enumerate() {
            buf[i] = c;
        }
        assert_eq!(from_wide(&buf), "abc");
    }
}
