//! Extension-based file categorization.
//!
//! This module maps file extensions to category names using an ordered
//! table. Lookups are case-insensitive and the first category (in
//! declaration order) containing the extension wins. Anything unmatched
//! falls into the `others` category.
//!
//! # Examples
//!
//! ```
//! use dirsort::file_category::ExtensionTable;
//!
//! let table = ExtensionTable::default();
//! assert_eq!(table.categorize(".JPG"), "images");
//! assert_eq!(table.categorize(".txt"), "documents");
//! assert_eq!(table.categorize(""), "others");
//! ```

use std::collections::HashSet;
use std::ffi::OsStr;

/// Category used when no table entry matches an extension.
pub const FALLBACK_CATEGORY: &str = "others";

/// Built-in table, in declaration order.
const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    ("images", &[".png", ".jpg", ".jpeg", ".gif", ".bmp"]),
    (
        "documents",
        &[
            ".pdf", ".docx", ".doc", ".txt", ".xls", ".xlsx", ".ppt", ".pptx", ".csv",
        ],
    ),
    ("archives", &[".zip", ".tar", ".gz", ".rar"]),
    ("code", &[".py", ".js", ".java", ".c", ".cpp", ".html", ".css"]),
    ("videos", &[".mp4", ".mkv", ".mov"]),
    ("audio", &[".mp3", ".wav", ".flac"]),
];

/// Problems found while validating an extension table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The same extension is declared by two categories.
    OverlappingExtension {
        extension: String,
        first: String,
        second: String,
    },
    /// A category name is declared more than once.
    DuplicateCategory(String),
    /// A category name cannot be used as a directory name.
    InvalidCategoryName(String),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::OverlappingExtension {
                extension,
                first,
                second,
            } => write!(
                f,
                "extension '{}' is declared by both '{}' and '{}'",
                extension, first, second
            ),
            TableError::DuplicateCategory(name) => {
                write!(f, "category '{}' is declared more than once", name)
            }
            TableError::InvalidCategoryName(name) => {
                write!(f, "'{}' is not a valid category directory name", name)
            }
        }
    }
}

impl std::error::Error for TableError {}

/// An ordered mapping from category name to a set of extensions.
///
/// Extensions are stored lowercase with their leading dot (`.png`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionTable {
    entries: Vec<(String, HashSet<String>)>,
}

impl ExtensionTable {
    /// Creates an empty table. Every lookup on it yields the fallback.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a category at the end of the table.
    ///
    /// Extensions are normalized: lowercased, and given a leading dot if it
    /// is missing (`"PNG"` becomes `".png"`).
    pub fn push_category<I, S>(&mut self, name: &str, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self.entries.push((name.to_string(), set));
    }

    /// Returns the category for an extension.
    ///
    /// The input may be empty and in any letter case. This never fails:
    /// unmatched input maps to [`FALLBACK_CATEGORY`].
    pub fn categorize(&self, extension: &str) -> &str {
        if extension.is_empty() {
            return FALLBACK_CATEGORY;
        }
        let ext = extension.to_lowercase();
        self.entries
            .iter()
            .find(|(_, exts)| exts.contains(&ext))
            .map(|(name, _)| name.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Category names in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Checks that the table can be used to lay out directories unambiguously.
    ///
    /// Overlapping extensions are reported instead of silently letting table
    /// order decide.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen_names: HashSet<&str> = HashSet::new();
        for (name, _) in &self.entries {
            if !is_valid_category_name(name) {
                return Err(TableError::InvalidCategoryName(name.clone()));
            }
            if !seen_names.insert(name.as_str()) {
                return Err(TableError::DuplicateCategory(name.clone()));
            }
        }

        for (i, (first, exts)) in self.entries.iter().enumerate() {
            for (second, later) in &self.entries[i + 1..] {
                // Sorted so the reported extension does not depend on hash order.
                let mut shared: Vec<&String> = exts.intersection(later).collect();
                shared.sort();
                if let Some(extension) = shared.first() {
                    return Err(TableError::OverlappingExtension {
                        extension: (*extension).clone(),
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for ExtensionTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (name, exts) in DEFAULT_TABLE {
            table.push_category(name, exts.iter());
        }
        table
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

fn is_valid_category_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

/// Splits a file name into base name and extension.
///
/// Leading dots are part of the base name, so `.bashrc` has no extension.
/// The extension keeps its dot and is taken from the last dot onwards.
///
/// ```
/// use dirsort::file_category::split_extension;
///
/// assert_eq!(split_extension("report.txt"), ("report", ".txt"));
/// assert_eq!(split_extension("backup.tar.gz"), ("backup.tar", ".gz"));
/// assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
/// assert_eq!(split_extension("README"), ("README", ""));
/// ```
pub fn split_extension(file_name: &str) -> (&str, &str) {
    let leading = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading..].rfind('.') {
        Some(idx) => file_name.split_at(leading + idx),
        None => (file_name, ""),
    }
}

/// [`split_extension`] over raw file names, so bytes that are not valid
/// UTF-8 are kept as they are.
#[cfg(unix)]
pub fn split_os_extension(file_name: &OsStr) -> (&OsStr, &OsStr) {
    use std::os::unix::ffi::OsStrExt;

    let bytes = file_name.as_bytes();
    let leading = bytes.iter().take_while(|&&b| b == b'.').count();
    match bytes[leading..].iter().rposition(|&b| b == b'.') {
        Some(idx) => {
            let (base, ext) = bytes.split_at(leading + idx);
            (OsStr::from_bytes(base), OsStr::from_bytes(ext))
        }
        None => (file_name, OsStr::new("")),
    }
}

/// [`split_extension`] over raw file names. Names that are not valid
/// Unicode are treated as having no extension.
#[cfg(not(unix))]
pub fn split_os_extension(file_name: &OsStr) -> (&OsStr, &OsStr) {
    match file_name.to_str() {
        Some(name) => {
            let (base, ext) = split_extension(name);
            (OsStr::new(base), OsStr::new(ext))
        }
        None => (file_name, OsStr::new("")),
    }
}
