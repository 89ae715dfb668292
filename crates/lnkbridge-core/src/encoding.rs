//! Text marshaling between caller byte strings and native text.
//!
//! Everything crossing the caller boundary must survive a round trip
//! through the configured encoding. `Utf8` treats caller bytes as UTF-8;
//! `PlatformNative` runs the platform's own conversion routine, which on
//! Windows means the active ANSI code page. On Unix the native encoding is
//! assumed to be UTF-8, so both modes share one code path there.
//!
//! Bytes that are invalid in the selected encoding are an error, never a
//! lossy substitution.

#![cfg_attr(windows, allow(unsafe_code))]

use crate::config::TextEncoding;
use crate::error::{LinkError, Result};

/// Codec resolved from a [`TextEncoding`] at store construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCodec {
    encoding: TextEncoding,
}

impl TextCodec {
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Decode caller bytes into text.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self.encoding {
            TextEncoding::Utf8 => decode_utf8(bytes),
            TextEncoding::PlatformNative => decode_native(bytes),
        }
    }

    /// Encode text into caller bytes.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self.encoding {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::PlatformNative => encode_native(text),
        }
    }

    /// Length in encoded bytes of `text`, excluding any terminator.
    pub fn encoded_len(&self, text: &str) -> Result<usize> {
        Ok(self.encode(text)?.len())
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new(TextEncoding::default())
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| LinkError::Encoding {
            encoding: "UTF-8",
            message: e.to_string(),
        })
}

// On Unix the platform encoding is taken to be UTF-8.
#[cfg(not(windows))]
fn decode_native(bytes: &[u8]) -> Result<String> {
    decode_utf8(bytes)
}

#[cfg(not(windows))]
fn encode_native(text: &str) -> Result<Vec<u8>> {
    Ok(text.as_bytes().to_vec())
}

/// Decode bytes in the active ANSI code page.
#[cfg(windows)]
fn decode_native(bytes: &[u8]) -> Result<String> {
    use windows::Win32::Globalization::{MultiByteToWideChar, CP_ACP, MB_ERR_INVALID_CHARS};

    if bytes.is_empty() {
        return Ok(String::new());
    }

    // SAFETY: the first call only sizes the output, the second fills a
    // buffer we own; both read from the caller-owned byte slice.
    let needed = unsafe { MultiByteToWideChar(CP_ACP, MB_ERR_INVALID_CHARS, bytes, None) };
    if needed <= 0 {
        return Err(invalid_native("byte sequence not valid in the active code page"));
    }
    let mut wide = vec![0u16; needed as usize];
    let written =
        unsafe { MultiByteToWideChar(CP_ACP, MB_ERR_INVALID_CHARS, bytes, Some(&mut wide)) };
    if written <= 0 {
        return Err(invalid_native("byte sequence not valid in the active code page"));
    }
    String::from_utf16(&wide[..written as usize])
        .map_err(|e| invalid_native(&e.to_string()))
}

/// Encode text into the active ANSI code page. Characters with no
/// representation in the code page are an error, not a best-fit swap.
#[cfg(windows)]
fn encode_native(text: &str) -> Result<Vec<u8>> {
    use windows::core::PCSTR;
    use windows::Win32::Foundation::BOOL;
    use windows::Win32::Globalization::{WideCharToMultiByte, CP_ACP, WC_NO_BEST_FIT_CHARS};

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let wide: Vec<u16> = text.encode_utf16().collect();
    let mut used_default = BOOL(0);

    // SAFETY: sizing call then fill call, both into buffers we own.
    let needed = unsafe {
        WideCharToMultiByte(
            CP_ACP,
            WC_NO_BEST_FIT_CHARS,
            &wide,
            None,
            PCSTR::null(),
            Some(&mut used_default),
        )
    };
    if needed <= 0 {
        return Err(invalid_native("text not convertible to the active code page"));
    }
    let mut out = vec![0u8; needed as usize];
    let written = unsafe {
        WideCharToMultiByte(
            CP_ACP,
            WC_NO_BEST_FIT_CHARS,
            &wide,
            Some(&mut out),
            PCSTR::null(),
            Some(&mut used_default),
        )
    };
    if written <= 0 || used_default.as_bool() {
        return Err(invalid_native(
            "text has no representation in the active code page",
        ));
    }
    out.truncate(written as usize);
    Ok(out)
}

#[cfg(windows)]
fn invalid_native(message: &str) -> LinkError {
    LinkError::Encoding {
        encoding: "the active code page",
        message: message.to_owned(),
    }
}
