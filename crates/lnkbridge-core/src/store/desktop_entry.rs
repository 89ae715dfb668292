//! Desktop-entry persistence backend.
//!
//! On non-Windows hosts the platform's shortcut-like facility is the XDG
//! desktop entry. Record fields map onto the standard keys (`Comment`,
//! `Path`, `Icon`, `Exec`); the icon index rides in an `X-` extension key
//! so that every record field survives a round trip. The target path is
//! always quoted inside `Exec`, which keeps it separable from the
//! arguments when the entry is read back.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{LinkError, Result};
use crate::record::ShortcutRecord;

const GROUP_HEADER: &str = "[Desktop Entry]";
const ICON_INDEX_KEY: &str = "X-Shortcut-Icon-Index";

pub(crate) fn save(identity: &Path, record: &ShortcutRecord) -> Result<()> {
    // Load-before-save: an existing entry supplies the defaults for every
    // field the caller left unset.
    let defaults = if identity.exists() {
        read_entry(identity)?
    } else {
        ShortcutRecord::default()
    };
    let merged = record.merged_over(&defaults);

    let content = render_entry(identity, &merged);
    fs::write(identity, content).map_err(|e| LinkError::io("commit shortcut", identity, e))?;
    debug!(path = %identity.display(), "shortcut committed");
    Ok(())
}

pub(crate) fn load(identity: &Path) -> Result<ShortcutRecord> {
    read_entry(identity)
}

fn render_entry(identity: &Path, record: &ShortcutRecord) -> String {
    let mut content = String::new();

    writeln!(content, "{GROUP_HEADER}").unwrap();
    writeln!(content, "Type=Application").unwrap();
    if let Some(stem) = identity.file_stem() {
        writeln!(content, "Name={}", stem.to_string_lossy()).unwrap();
    }
    if let Some(ref description) = record.description {
        writeln!(content, "Comment={description}").unwrap();
    }
    if record.path.is_some() || record.arguments.is_some() {
        writeln!(
            content,
            "Exec={}",
            render_exec(
                record.path.as_deref().unwrap_or(""),
                record.arguments.as_deref().unwrap_or(""),
            )
        )
        .unwrap();
    }
    if let Some(ref working_directory) = record.working_directory {
        writeln!(content, "Path={working_directory}").unwrap();
    }
    if let Some(ref icon_location) = record.icon_location {
        writeln!(content, "Icon={icon_location}").unwrap();
    }
    if let Some(icon_index) = record.icon_index {
        writeln!(content, "{ICON_INDEX_KEY}={icon_index}").unwrap();
    }

    content
}

fn read_entry(identity: &Path) -> Result<ShortcutRecord> {
    let content = fs::read_to_string(identity)
        .map_err(|e| LinkError::io("open shortcut", identity, e))?;
    parse_entry(identity, &content)
}

fn parse_entry(identity: &Path, content: &str) -> Result<ShortcutRecord> {
    let mut lines = content
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    if lines.next() != Some(GROUP_HEADER) {
        return Err(parse_err("read entry header", identity));
    }

    let mut record = ShortcutRecord::default();
    for line in lines {
        let Some((key, value)) = line.split_once('=') else {
            return Err(parse_err("read entry field", identity));
        };
        match key {
            "Comment" => record.description = Some(value.to_owned()),
            "Exec" => {
                let (path, arguments) = parse_exec(value, identity)?;
                record.path = Some(path);
                record.arguments = Some(arguments);
            }
            "Path" => record.working_directory = Some(value.to_owned()),
            "Icon" => record.icon_location = Some(value.to_owned()),
            ICON_INDEX_KEY => {
                record.icon_index = Some(
                    value
                        .parse()
                        .map_err(|_| parse_err("read icon index", identity))?,
                );
            }
            // Name, Type, and any foreign keys are not record fields.
            _ => {}
        }
    }
    Ok(record)
}

/// Quote the target and append the arguments verbatim.
fn render_exec(path: &str, arguments: &str) -> String {
    let mut quoted = String::with_capacity(path.len() + 2);
    quoted.push('"');
    for c in path.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    if arguments.is_empty() {
        quoted
    } else {
        format!("{quoted} {arguments}")
    }
}

/// Split an `Exec` value back into target and arguments.
fn parse_exec(value: &str, identity: &Path) -> Result<(String, String)> {
    let Some(rest) = value.strip_prefix('"') else {
        // Unquoted entries (written by other tools): first token is the
        // target, the remainder the arguments.
        return Ok(match value.split_once(' ') {
            Some((path, arguments)) => (path.to_owned(), arguments.to_owned()),
            None => (value.to_owned(), String::new()),
        });
    };

    let mut path = String::new();
    let mut chars = rest.chars();
    loop {
        match chars.next() {
            Some('\\') => match chars.next() {
                Some(c) => path.push(c),
                None => return Err(parse_err("read exec field", identity)),
            },
            Some('"') => break,
            Some(c) => path.push(c),
            None => return Err(parse_err("read exec field", identity)),
        }
    }
    let arguments = chars.as_str().strip_prefix(' ').unwrap_or(chars.as_str());
    Ok((path, arguments.to_owned()))
}

fn parse_err(step: &'static str, identity: &Path) -> LinkError {
    LinkError::Io {
        step,
        path: Some(identity.to_path_buf()),
        source: Some(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "malformed desktop entry",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn identity() -> PathBuf {
        PathBuf::from("/desk/editor.desktop")
    }

    #[test]
    fn test_rendered_entry_content() {
        let mut record = ShortcutRecord::new();
        record.description = Some("Launch the editor".into());
        record.set_path("/usr/bin/editor");
        record.arguments = Some("--fast".into());
        record.icon_location = Some("/usr/share/icons/editor.png".into());
        record.icon_index = Some(0);

        let content = render_entry(&identity(), &record);
        assert!(content.starts_with("[Desktop Entry]\n"));
        assert!(content.contains("Type=Application\n"));
        assert!(content.contains("Name=editor\n"));
        assert!(content.contains("Comment=Launch the editor\n"));
        assert!(content.contains("Exec=\"/usr/bin/editor\" --fast\n"));
        assert!(content.contains("Path=/usr/bin\n"));
        assert!(content.contains("Icon=/usr/share/icons/editor.png\n"));
        assert!(content.contains("X-Shortcut-Icon-Index=0\n"));
    }

    #[test]
    fn test_render_parse_round_trip() {
        let mut record = ShortcutRecord::new();
        record.description = Some("Notes — révision".into());
        record.path = Some("/opt/my tools/notes".into());
        record.arguments = Some("--profile \"day to day\"".into());
        record.working_directory = Some("/opt/my tools".into());
        record.icon_location = Some("/opt/my tools/notes.ico".into());
        record.icon_index = Some(4);

        let parsed = parse_entry(&identity(), &render_entry(&identity(), &record)).unwrap();
        assert_eq!(parsed.description, record.description);
        assert_eq!(parsed.path, record.path);
        assert_eq!(parsed.arguments, record.arguments);
        assert_eq!(parsed.working_directory, record.working_directory);
        assert_eq!(parsed.icon_location, record.icon_location);
        assert_eq!(parsed.icon_index, record.icon_index);
    }

    #[test]
    fn test_parse_unquoted_exec_from_other_tools() {
        let content = "[Desktop Entry]\nType=Application\nExec=/usr/bin/editor --fast\n";
        let parsed = parse_entry(&identity(), content).unwrap();
        assert_eq!(parsed.path.as_deref(), Some("/usr/bin/editor"));
        assert_eq!(parsed.arguments.as_deref(), Some("--fast"));
    }

    #[test]
    fn test_quoted_target_with_escapes() {
        let rendered = render_exec("/odd/\"quoted\"/path", "");
        let (path, arguments) = parse_exec(&rendered, &identity()).unwrap();
        assert_eq!(path, "/odd/\"quoted\"/path");
        assert_eq!(arguments, "");
    }

    #[test]
    fn test_malformed_entry_is_an_io_error() {
        let err = parse_entry(&identity(), "not a desktop entry\n").unwrap_err();
        assert!(matches!(err, LinkError::Io { .. }));

        let err = parse_entry(
            &identity(),
            "[Desktop Entry]\nX-Shortcut-Icon-Index=three\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LinkError::Io {
                step: "read icon index",
                ..
            }
        ));
    }
}
