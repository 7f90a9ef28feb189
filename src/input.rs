//! Transcript loading.
//!
//! A transcript arrives either as a plain `.txt` export or as a `.zip`
//! archive that contains one (the entry whose name ends with `_chat.txt` by
//! default). Anything else is rejected with
//! [`ChatscopeError::UnsupportedInputFormat`].

use std::fs;
#[cfg(feature = "archive")]
use std::io::{Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{ChatscopeError, Result};

/// Kind of input file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Archive,
}

impl InputKind {
    /// Detects the input kind from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("txt") => Ok(InputKind::Text),
            Some("zip") => Ok(InputKind::Archive),
            _ => Err(ChatscopeError::unsupported_input(
                "expected a .txt transcript or a .zip export",
                Some(path.to_path_buf()),
            )),
        }
    }
}

/// Reads the transcript text at `path`.
///
/// # Errors
///
/// - [`ChatscopeError::UnsupportedInputFormat`] for other extensions, for an
///   archive without a matching entry, or for an archive when the `archive`
///   feature is disabled
/// - [`ChatscopeError::Io`] / [`ChatscopeError::Archive`] on read failures
/// - [`ChatscopeError::Utf8`] if the text is not UTF-8
pub fn load_transcript(path: &Path, config: &ParserConfig) -> Result<String> {
    match InputKind::from_path(path)? {
        InputKind::Text => {
            debug!(path = %path.display(), "reading plain-text transcript");
            let bytes = fs::read(path)?;
            decode(bytes, &path.display().to_string())
        }
        InputKind::Archive => load_archive(path, config),
    }
}

#[cfg(feature = "archive")]
fn load_archive(path: &Path, config: &ParserConfig) -> Result<String> {
    debug!(path = %path.display(), "reading transcript from archive");
    let file = fs::File::open(path)?;
    read_archive(file, &config.archive_entry_suffix).map_err(|err| match err {
        ChatscopeError::UnsupportedInputFormat { message, path: None } => {
            ChatscopeError::unsupported_input(message, Some(path.to_path_buf()))
        }
        other => other,
    })
}

#[cfg(not(feature = "archive"))]
fn load_archive(path: &Path, _config: &ParserConfig) -> Result<String> {
    Err(ChatscopeError::unsupported_input(
        "archive support is disabled (enable the `archive` feature)",
        Some(path.to_path_buf()),
    ))
}

/// Extracts the first entry whose name ends with `suffix` from a zip archive.
///
/// # Example
///
/// ```
/// use std::io::{Cursor, Write};
/// use chatscope::input::read_archive;
///
/// let mut buf = Cursor::new(Vec::new());
/// {
///     let mut zip = zip::ZipWriter::new(&mut buf);
///     zip.start_file("WhatsApp Chat_chat.txt", zip::write::SimpleFileOptions::default())?;
///     zip.write_all(b"[1/1/2021, 9:00] Ann: hi\n")?;
///     zip.finish()?;
/// }
///
/// let text = read_archive(Cursor::new(buf.into_inner()), "_chat.txt")?;
/// assert!(text.contains("Ann: hi"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "archive")]
pub fn read_archive<R: Read + Seek>(reader: R, suffix: &str) -> Result<String> {
    let mut archive = zip::ZipArchive::new(reader)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !entry.is_file() || !entry.name().ends_with(suffix) {
            continue;
        }

        let name = entry.name().to_string();
        debug!(entry = %name, "found transcript entry");
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        return decode(bytes, &name);
    }

    Err(ChatscopeError::unsupported_input(
        format!("archive has no entry ending with '{suffix}'"),
        None,
    ))
}

fn decode(bytes: Vec<u8>, context: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|source| ChatscopeError::Utf8 {
        context: context.to_string(),
        source,
    })
}
