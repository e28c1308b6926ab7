//! # Notes
//!
//! The research document shown in the notes canvas, plus the two things a
//! user can do with it from the header: copy it to the clipboard and save
//! it as a markdown file.
//!
//! Clipboard access sits behind the [`Clipboard`] trait so the event loop
//! can use the system clipboard while tests use an in-memory one.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

/// Suffix appended to every exported notes file.
pub const EXPORT_SUFFIX: &str = "_notes.md";

/// An immutable markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub markdown: String,
}

impl Document {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
        }
    }

    /// Load a document from a markdown file. The title is the file stem.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let markdown = fs::read_to_string(path)?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Notes".to_string());
        info!("Loaded notes document from {}", path.display());
        Ok(Self { title, markdown })
    }
}

/// File name for a chat's exported notes.
///
/// Runs of whitespace become a single `-`, as do path separators, and
/// `_notes.md` is appended. `"AI Notes Chat"` → `"AI-Notes-Chat_notes.md"`.
pub fn export_file_name(chat_name: &str) -> String {
    let mut stem = String::with_capacity(chat_name.len());
    let mut in_gap = false;
    for c in chat_name.chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            if !in_gap {
                stem.push('-');
                in_gap = true;
            }
        } else {
            stem.push(c);
            in_gap = false;
        }
    }

    if stem.trim_matches('-').is_empty() {
        stem = "notes".to_string();
    }
    format!("{stem}{EXPORT_SUFFIX}")
}

/// Write `contents` to `dir/file_name`, creating `dir` if needed.
///
/// The write goes to a `.tmp` sibling first and is renamed into place.
pub fn export_notes(dir: &Path, file_name: &str, contents: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, &path)?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(path)
}

/// Default directory for exported notes: the user's downloads folder,
/// falling back to the current directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

// ============================================================================
// Clipboard
// ============================================================================

#[derive(Debug)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display server).
    Unavailable(String),
    /// The clipboard was opened but rejected the write.
    Write(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "clipboard unavailable: {msg}"),
            ClipboardError::Write(msg) => write!(f, "clipboard write failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Somewhere text can be copied to.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, opened on each write so a clipboard that appears
/// after startup (e.g. a late X11 session) still works.
#[derive(Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        debug!("Copied {} bytes to the system clipboard", text.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_name_replaces_spaces_with_hyphens() {
        assert_eq!(export_file_name("AI Notes Chat"), "AI-Notes-Chat_notes.md");
    }

    #[test]
    fn export_name_collapses_whitespace_runs() {
        assert_eq!(export_file_name("Deep \t  Learning\nIntro"), "Deep-Learning-Intro_notes.md");
    }

    #[test]
    fn export_name_keeps_leading_and_trailing_gaps_as_single_hyphen() {
        assert_eq!(export_file_name("  Physics "), "-Physics-_notes.md");
    }

    #[test]
    fn export_name_neutralizes_path_separators() {
        assert_eq!(export_file_name("../etc/passwd"), "..-etc-passwd_notes.md");
        assert_eq!(export_file_name("a\\b"), "a-b_notes.md");
    }

    #[test]
    fn export_name_blank_falls_back() {
        assert_eq!(export_file_name(""), "notes_notes.md");
        assert_eq!(export_file_name("   "), "notes_notes.md");
    }

    #[test]
    fn export_notes_writes_file_and_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");

        let path = export_notes(&target, "AI-Notes-Chat_notes.md", "# Hello").unwrap();

        assert_eq!(path, target.join("AI-Notes-Chat_notes.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Hello");
        assert!(!target.join("AI-Notes-Chat_notes.tmp").exists());
    }

    #[test]
    fn export_notes_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        export_notes(dir.path(), "x_notes.md", "old").unwrap();
        let path = export_notes(dir.path(), "x_notes.md", "new").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn document_from_file_uses_stem_as_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.md");
        fs::write(&path, "# Lecture").unwrap();

        let doc = Document::from_file(&path).unwrap();
        assert_eq!(doc.title, "lecture");
        assert_eq!(doc.markdown, "# Lecture");
    }

    #[test]
    fn document_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Document::from_file(&dir.path().join("missing.md")).is_err());
    }
}
