//! Store configuration.
//!
//! The one tunable is the text encoding assumed for caller-supplied byte
//! strings. It is resolved once, when a store is constructed, rather than
//! branching at each call site.

/// How caller byte strings are interpreted at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// Caller text arrives as UTF-8 bytes.
    #[default]
    Utf8,
    /// Caller text arrives in the platform's own multi-byte encoding: the
    /// active ANSI code page on Windows. On Unix the native encoding is
    /// taken to be UTF-8, so the two modes coincide there.
    PlatformNative,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::PlatformNative => "platform_native",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "utf8" | "utf-8" => Some(TextEncoding::Utf8),
            "platform_native" | "native" => Some(TextEncoding::PlatformNative),
            _ => None,
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a [`ShortcutStore`](crate::ShortcutStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Encoding of text crossing the caller boundary.
    pub text_encoding: TextEncoding,
}
