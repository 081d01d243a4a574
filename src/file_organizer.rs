//! Moving files into category directories.
//!
//! An organize run takes a snapshot of the target folder's direct children,
//! classifies every non-directory entry by extension, creates the category
//! directory on demand and moves the file under a name that does not clash
//! with anything already there. Category directories created during a run
//! are never scanned by that same run.

use crate::config::CompiledFilters;
use crate::file_category::{ExtensionTable, split_os_extension};
use crate::move_log::MoveLog;
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A single decided move. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Where the file was found.
    pub source: PathBuf,
    /// Where the file went (or would go in a dry run).
    pub destination: PathBuf,
    /// The category the file was assigned to.
    pub category: String,
}

/// Moves of one category, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMoves {
    pub category: String,
    pub moves: Vec<MoveRecord>,
}

/// Outcome of an organize run, grouped by category in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    pub dry_run: bool,
    pub categories: Vec<CategoryMoves>,
}

impl OrganizeReport {
    fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            categories: Vec::new(),
        }
    }

    fn push(&mut self, record: MoveRecord) {
        match self
            .categories
            .iter_mut()
            .find(|group| group.category == record.category)
        {
            Some(group) => group.moves.push(record),
            None => self.categories.push(CategoryMoves {
                category: record.category.clone(),
                moves: vec![record],
            }),
        }
    }

    /// Moves recorded for one category.
    pub fn get(&self, category: &str) -> Option<&[MoveRecord]> {
        self.categories
            .iter()
            .find(|group| group.category == category)
            .map(|group| group.moves.as_slice())
    }

    /// All moves, in processing order within each category.
    pub fn moves(&self) -> impl Iterator<Item = &MoveRecord> {
        self.categories.iter().flat_map(|group| group.moves.iter())
    }

    /// Per-category file counts, in first-seen order.
    pub fn summary(&self) -> Vec<(&str, usize)> {
        self.categories
            .iter()
            .map(|group| (group.category.as_str(), group.moves.len()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.categories.iter().map(|group| group.moves.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Errors that can occur during file organization.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target path does not exist or is not a directory.
    NotADirectory(PathBuf),
    /// The target directory could not be listed.
    ReadDirFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
    /// Failed to append to the move log.
    LogWriteFailed { source: io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotADirectory(path) => {
                write!(f, "Not a directory: {}", path.display())
            }
            Self::ReadDirFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::LogWriteFailed { source } => {
                write!(f, "Failed to write move log: {}", source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotADirectory(_) => None,
            Self::ReadDirFailed { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::LogWriteFailed { source } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
        }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

fn log_io(source: io::Error) -> OrganizeError {
    OrganizeError::LogWriteFailed { source }
}

/// Logs `err` at ERROR and hands it back, so a broken log never hides it.
fn log_failure<W: Write>(log: &mut MoveLog<W>, err: OrganizeError) -> OrganizeError {
    if let Err(e) = log.error(&err.to_string()) {
        tracing::warn!("Could not log failure ({}): {}", err, e);
    }
    err
}

/// Sorts the files of a folder into category subdirectories.
#[derive(Clone, Default)]
pub struct FileOrganizer {
    table: ExtensionTable,
    filters: CompiledFilters,
    progress: Option<ProgressBar>,
}

impl FileOrganizer {
    /// Creates an organizer with the given table and no filters.
    pub fn new(table: ExtensionTable) -> Self {
        Self {
            table,
            filters: CompiledFilters::default(),
            progress: None,
        }
    }

    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Advances `progress` once per eligible entry.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Organizes `folder`, logging every decision to `log`.
    ///
    /// With `dry_run` set nothing on disk changes: no directory is created
    /// and no file is moved, but every intended move is still recorded and
    /// logged. Destinations planned earlier in the same run count as taken,
    /// so the preview names match what a real run would pick.
    ///
    /// The first filesystem failure is logged and aborts the run; files
    /// already moved stay where they are.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_category::ExtensionTable;
    /// use dirsort::file_organizer::FileOrganizer;
    /// use dirsort::move_log::MoveLog;
    /// use std::path::Path;
    ///
    /// let organizer = FileOrganizer::new(ExtensionTable::default());
    /// let mut log = MoveLog::new(std::io::stderr());
    /// let report = organizer.organize(Path::new("/home/me/Downloads"), true, &mut log)?;
    /// for (category, count) in report.summary() {
    ///     println!("{}: {} files", category, count);
    /// }
    /// # Ok::<(), dirsort::file_organizer::OrganizeError>(())
    /// ```
    pub fn organize<W: Write>(
        &self,
        folder: &Path,
        dry_run: bool,
        log: &mut MoveLog<W>,
    ) -> OrganizeResult<OrganizeReport> {
        if !folder.is_dir() {
            return Err(OrganizeError::NotADirectory(folder.to_path_buf()));
        }

        let entries = self.snapshot(folder, log.path())?;
        tracing::debug!("{} eligible entries in {}", entries.len(), folder.display());
        if let Some(progress) = &self.progress {
            progress.set_length(entries.len() as u64);
        }

        let mut report = OrganizeReport::new(dry_run);
        let mut planned: HashSet<PathBuf> = HashSet::new();
        for (source, file_name) in entries {
            let (_, extension) = split_os_extension(&file_name);
            let category = self.table.categorize(&extension.to_string_lossy());
            let dest_dir = folder.join(category);

            if !dry_run
                && let Err(e) = ensure_dir(&dest_dir)
            {
                return Err(log_failure(log, e));
            }

            let destination = resolve_destination(&dest_dir, &file_name, &planned);
            if dry_run {
                log.would_move(&source, &destination).map_err(log_io)?;
            } else {
                if let Err(e) = move_file(&source, &destination) {
                    return Err(log_failure(log, e));
                }
                log.moved(&source, &destination).map_err(log_io)?;
            }
            planned.insert(destination.clone());

            if let Some(progress) = &self.progress {
                progress.set_message(file_name.to_string_lossy().into_owned());
                progress.inc(1);
            }

            report.push(MoveRecord {
                source,
                destination,
                category: category.to_string(),
            });
        }

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }
        Ok(report)
    }

    /// Lists the entries to process, before anything is mutated.
    ///
    /// Sorted by name so runs are reproducible. Directories (and symlinks to
    /// directories), filtered names and the active log file are left out.
    fn snapshot(
        &self,
        folder: &Path,
        log_path: Option<&Path>,
    ) -> OrganizeResult<Vec<(PathBuf, OsString)>> {
        let read_dir = fs::read_dir(folder).map_err(|e| OrganizeError::ReadDirFailed {
            path: folder.to_path_buf(),
            source: e,
        })?;
        let log_path = log_path.and_then(|p| fs::canonicalize(p).ok());

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| OrganizeError::ReadDirFailed {
                path: folder.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }

            let file_name = entry.file_name();
            if !self.filters.should_include(&file_name.to_string_lossy()) {
                tracing::debug!("Skipping filtered entry {}", path.display());
                continue;
            }
            if log_path.is_some() && fs::canonicalize(&path).ok() == log_path {
                tracing::debug!("Skipping active log file {}", path.display());
                continue;
            }
            entries.push((path, file_name));
        }
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(entries)
    }
}

/// Creates `dir` unless it already exists as a directory.
fn ensure_dir(dir: &Path) -> OrganizeResult<()> {
    if dir.is_dir() {
        return Ok(());
    }
    tracing::debug!("Creating category directory {}", dir.display());
    fs::create_dir_all(dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Picks the first free name for `file_name` inside `dir`.
///
/// Tries `file_name` first, then `<base> (1)<ext>`, `<base> (2)<ext>`, and so
/// on. Only the directory's current contents are consulted. The name is
/// otherwise kept byte for byte, including bytes that are not UTF-8.
pub fn unique_path(dir: &Path, file_name: impl AsRef<OsStr>) -> PathBuf {
    resolve_destination(dir, file_name.as_ref(), &HashSet::new())
}

/// Like [`unique_path`], also treating `planned` paths as taken.
fn resolve_destination(dir: &Path, file_name: &OsStr, planned: &HashSet<PathBuf>) -> PathBuf {
    let taken = |path: &Path| is_occupied(path) || planned.contains(path);

    let candidate = dir.join(file_name);
    if !taken(&candidate) {
        return candidate;
    }

    let (base, ext) = split_os_extension(file_name);
    let mut counter: u64 = 1;
    loop {
        let mut name = base.to_os_string();
        name.push(format!(" ({})", counter));
        name.push(ext);
        let candidate = dir.join(name);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

// Dangling symlinks count as taken so a rename never replaces them.
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Renames `source` to `destination`, copying across filesystems.
fn move_file(source: &Path, destination: &Path) -> OrganizeResult<()> {
    let failure = |e: io::Error| OrganizeError::FileMoveFailure {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source_error: e,
    };

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!("Copying {} across filesystems", source.display());
            copy_then_remove(source, destination).map_err(failure)
        }
        Err(e) => Err(failure(e)),
    }
}

/// Cross-filesystem move. Symlinks are recreated, not followed.
fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    let is_symlink = fs::symlink_metadata(source)?.file_type().is_symlink();
    if is_symlink {
        copy_symlink(source, destination)?;
    } else {
        fs::copy(source, destination)?;
    }
    fs::remove_file(source)
}

#[cfg(unix)]
fn copy_symlink(source: &Path, destination: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(source)?, destination)
}

// Elsewhere the link is resolved and its target copied.
#[cfg(not(unix))]
fn copy_symlink(source: &Path, destination: &Path) -> io::Result<()> {
    fs::copy(source, destination).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn organize(base: &Path, dry_run: bool) -> (OrganizeReport, Vec<String>) {
        let organizer = FileOrganizer::new(ExtensionTable::default());
        let mut log = MoveLog::new(Vec::new());
        let report = organizer
            .organize(base, dry_run, &mut log)
            .expect("organize failed");
        let lines = String::from_utf8(log.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        (report, lines)
    }

    #[test]
    fn test_unique_path_without_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = unique_path(temp_dir.path(), "report.txt");
        assert_eq!(path, temp_dir.path().join("report.txt"));
    }

    #[test]
    fn test_unique_path_counts_up() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        fs::write(dir.join("report.txt"), "a").unwrap();
        assert_eq!(unique_path(dir, "report.txt"), dir.join("report (1).txt"));

        fs::write(dir.join("report (1).txt"), "b").unwrap();
        assert_eq!(unique_path(dir, "report.txt"), dir.join("report (2).txt"));
    }

    #[test]
    fn test_unique_path_takes_lowest_free_counter() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        fs::write(dir.join("x.png"), "").unwrap();
        fs::write(dir.join("x (2).png"), "").unwrap();
        assert_eq!(unique_path(dir, "x.png"), dir.join("x (1).png"));
    }

    #[test]
    fn test_unique_path_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        fs::write(dir.join("Makefile"), "").unwrap();
        assert_eq!(unique_path(dir, "Makefile"), dir.join("Makefile (1)"));

        fs::write(dir.join("archive.tar.gz"), "").unwrap();
        assert_eq!(
            unique_path(dir, "archive.tar.gz"),
            dir.join("archive.tar (1).gz")
        );
    }

    #[test]
    fn test_unique_path_in_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("images");
        assert_eq!(unique_path(&dir, "a.png"), dir.join("a.png"));
    }

    #[test]
    fn test_organize_moves_and_groups() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("a.png"), "png").unwrap();
        fs::write(base.join("b.txt"), "txt").unwrap();
        fs::write(base.join("c.xyz"), "xyz").unwrap();

        let (report, lines) = organize(base, false);

        assert_eq!(
            report.summary(),
            vec![("images", 1), ("documents", 1), ("others", 1)]
        );
        assert_eq!(report.total(), 3);
        assert!(!report.dry_run);
        assert!(base.join("images/a.png").is_file());
        assert!(base.join("documents/b.txt").is_file());
        assert!(base.join("others/c.xyz").is_file());
        assert!(!base.join("a.png").exists());

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.contains(" INFO Moved ")));

        let record = &report.get("images").unwrap()[0];
        assert_eq!(record.source, base.join("a.png"));
        assert_eq!(record.destination, base.join("images").join("a.png"));
        assert_eq!(record.category, "images");
    }

    #[test]
    fn test_organize_dry_run_touches_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("a.png"), "png").unwrap();
        fs::write(base.join("b.txt"), "txt").unwrap();

        let (report, lines) = organize(base, true);

        assert!(report.dry_run);
        assert_eq!(report.total(), 2);
        assert!(base.join("a.png").is_file());
        assert!(base.join("b.txt").is_file());
        assert!(!base.join("images").exists());
        assert!(!base.join("documents").exists());

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.contains(" INFO [DRY-RUN] Would move ")));
        assert_eq!(
            report.get("images").unwrap()[0].destination,
            base.join("images").join("a.png")
        );
    }

    #[test]
    fn test_organize_empty_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let (report, lines) = organize(temp_dir.path(), false);
        assert!(report.is_empty());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_organize_not_a_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, "").unwrap();

        let organizer = FileOrganizer::default();
        let mut log = MoveLog::new(Vec::new());
        let result = organizer.organize(&file, false, &mut log);
        assert!(matches!(result, Err(OrganizeError::NotADirectory(_))));

        let result = organizer.organize(Path::new("/non/existent/path"), false, &mut log);
        assert!(matches!(result, Err(OrganizeError::NotADirectory(_))));
        assert!(log.into_inner().is_empty());
    }

    #[test]
    fn test_organize_skips_existing_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("projects.zip")).unwrap();
        fs::write(base.join("projects.zip/inner.txt"), "").unwrap();

        let (report, _) = organize(base, false);

        assert!(report.is_empty());
        assert!(base.join("projects.zip/inner.txt").is_file());
        assert!(!base.join("archives").exists());
    }

    #[test]
    fn test_organize_resolves_collision_in_category() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("documents")).unwrap();
        fs::write(base.join("documents/report.txt"), "old").unwrap();
        fs::write(base.join("report.txt"), "new").unwrap();

        let (report, _) = organize(base, false);

        let moved = &report.get("documents").unwrap()[0];
        assert_eq!(moved.destination, base.join("documents").join("report (1).txt"));
        assert_eq!(
            fs::read_to_string(base.join("documents/report.txt")).unwrap(),
            "old"
        );
        assert_eq!(
            fs::read_to_string(base.join("documents/report (1).txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_organize_fails_when_category_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        // A regular file named like the category blocks directory creation.
        fs::write(base.join("images"), "not a dir").unwrap();
        fs::write(base.join("a.png"), "png").unwrap();

        let organizer = FileOrganizer::default();
        let mut log = MoveLog::new(Vec::new());
        let result = organizer.organize(base, false, &mut log);

        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
        assert!(base.join("a.png").is_file());
        let content = String::from_utf8(log.into_inner()).unwrap();
        assert!(content.contains(" ERROR Failed to create directory"));
    }

    #[test]
    fn test_organize_applies_filters() {
        use crate::config::Config;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("keep.part"), "").unwrap();
        fs::write(base.join("a.png"), "").unwrap();

        let filters = Config::from_toml("[filters.exclude]\npatterns = [\"*.part\"]\n")
            .unwrap()
            .compile_filters()
            .unwrap();
        let organizer = FileOrganizer::new(ExtensionTable::default()).with_filters(filters);
        let mut log = MoveLog::new(Vec::new());
        let report = organizer.organize(base, false, &mut log).unwrap();

        assert_eq!(report.summary(), vec![("images", 1)]);
        assert!(base.join("keep.part").is_file());
    }

    #[test]
    fn test_organize_skips_active_log_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let log_path = base.join("file_organizer.log");
        fs::write(base.join("b.txt"), "").unwrap();

        let organizer = FileOrganizer::default();
        let mut log = MoveLog::open(&log_path).unwrap();
        let report = organizer.organize(base, false, &mut log).unwrap();

        assert_eq!(report.summary(), vec![("documents", 1)]);
        assert!(log_path.is_file());
        assert!(!base.join("others").exists());
        let content = fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_organize_dry_run_counts_planned_destinations() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("images")).unwrap();
        fs::write(base.join("images/x.png"), "old").unwrap();
        fs::write(base.join("x.png"), "a").unwrap();
        fs::write(base.join("x (1).png"), "b").unwrap();

        let destinations = |report: &OrganizeReport| -> Vec<PathBuf> {
            report.moves().map(|m| m.destination.clone()).collect()
        };

        let (preview, _) = organize(base, true);
        let (actual, _) = organize(base, false);

        // "x (1).png" sorts first and takes the slot "x.png" would want.
        let expected = vec![
            base.join("images").join("x (1).png"),
            base.join("images").join("x (2).png"),
        ];
        assert_eq!(destinations(&preview), expected);
        assert_eq!(destinations(&actual), expected);
        assert_eq!(fs::read_to_string(base.join("images/x (2).png")).unwrap(), "a");
    }

    #[cfg(unix)]
    #[test]
    fn test_organize_keeps_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let name = OsStr::from_bytes(b"caf\xe9.txt");
        if fs::write(base.join(name), "menu").is_err() {
            // Some filesystems only accept UTF-8 names.
            return;
        }
        fs::create_dir(base.join("documents")).unwrap();
        fs::write(base.join("documents").join(name), "old").unwrap();

        let (report, _) = organize(base, false);

        let moved = &report.get("documents").unwrap()[0];
        assert_eq!(
            moved.destination,
            base.join("documents").join(OsStr::from_bytes(b"caf\xe9 (1).txt"))
        );
        assert_eq!(fs::read_to_string(&moved.destination).unwrap(), "menu");
        assert!(!base.join(name).exists());
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_organize_reports_failure_when_log_is_broken() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("images"), "not a dir").unwrap();
        fs::write(base.join("a.png"), "png").unwrap();

        let organizer = FileOrganizer::default();
        let mut log = MoveLog::new(BrokenSink);
        let result = organizer.organize(base, false, &mut log);

        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_then_remove_keeps_symlinks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("target.txt"), "data").unwrap();
        std::os::unix::fs::symlink("target.txt", base.join("link.txt")).unwrap();
        fs::create_dir(base.join("documents")).unwrap();

        let destination = base.join("documents/link.txt");
        copy_then_remove(&base.join("link.txt"), &destination).unwrap();

        let metadata = fs::symlink_metadata(&destination).unwrap();
        assert!(metadata.file_type().is_symlink());
        assert_eq!(fs::read_link(&destination).unwrap(), Path::new("target.txt"));
        assert!(fs::symlink_metadata(base.join("link.txt")).is_err());
        assert!(base.join("target.txt").is_file());
    }
}
