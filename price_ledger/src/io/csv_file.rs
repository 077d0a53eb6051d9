//! CSV ledger file on local disk.
//!
//! Saving writes the whole ledger into a temporary file next to the target
//! and renames it over the target, so readers see either the old or the new
//! ledger and never a truncated one. A symlinked ledger is written through
//! to its target, and the replaced file's permissions carry over.
//! This does not serialize concurrent
//! writers: two runs racing on the same file can still lose an update.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use snafu::ResultExt;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{
    io::store::{CorruptSnafu, LedgerStore, PersistSnafu, ReadSnafu, StoreError, WriteSnafu},
    ledger::Ledger,
};

/// Default file name, resolved against the working directory.
pub const DEFAULT_FILENAME: &str = "prices.csv";

#[derive(Debug, Clone)]
pub struct CsvLedgerFile {
    path: PathBuf,
}

impl CsvLedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file the ledger bytes actually live in.
    ///
    /// An existing path is resolved through any symlinks so that saving
    /// updates the link target instead of replacing the link.
    fn resolved_path(&self) -> Result<PathBuf, StoreError> {
        match fs::canonicalize(&self.path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(e).context(WriteSnafu { path: &self.path }),
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

impl LedgerStore for CsvLedgerFile {
    fn load(&self) -> Result<Ledger, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let ledger = Ledger::parse(&text).context(CorruptSnafu { path: &self.path })?;
                debug!(path = %self.path.display(), records = ledger.len(), "loaded ledger");
                Ok(ledger)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no ledger yet, starting a new one");
                Ok(Ledger::new())
            }
            Err(e) => Err(e).context(ReadSnafu { path: &self.path }),
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let target = self.resolved_path()?;
        let dir = parent_dir(&target);
        fs::create_dir_all(dir).context(WriteSnafu { path: dir })?;

        let mut tmp = NamedTempFile::new_in(dir).context(WriteSnafu { path: dir })?;
        // The temp file is created owner-only; keep the mode of the ledger it replaces.
        if let Ok(existing) = fs::metadata(&target) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .context(WriteSnafu { path: tmp.path() })?;
        }
        tmp.write_all(ledger.to_text().as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .context(WriteSnafu { path: tmp.path() })?;
        tmp.persist(&target)
            .context(PersistSnafu { path: &target })?;

        debug!(path = %target.display(), records = ledger.len(), "ledger written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{HOURS_PER_DAY, ReadingSet, header_line};

    fn readings(first: f64) -> ReadingSet {
        let mut values = vec![first];
        values.resize(HOURS_PER_DAY, 1.0);
        ReadingSet::new(values).unwrap()
    }

    #[test]
    fn missing_file_loads_header_only_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerFile::new(dir.path().join(DEFAULT_FILENAME));
        let ledger = store.load().unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.header(), header_line());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLedgerFile::new(dir.path().join("nested").join("prices.csv"));

        let mut ledger = Ledger::new();
        ledger.merge("2022-01-02", &readings(2.0)).unwrap();
        ledger.merge("2022-01-01", &readings(1.0)).unwrap();
        store.save(&ledger).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("date, 0, 1, "));
        assert!(!text.ends_with('\n'));
        assert_eq!(text.lines().count(), 3);
        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, "a much longer previous file that must not leave a tail behind\n".repeat(20))
            .unwrap();

        let store = CsvLedgerFile::new(&path);
        store.save(&Ledger::new()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), header_line());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, header_line()).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = CsvLedgerFile::new(&path);
        let mut ledger = store.load().unwrap();
        ledger.merge("2022-01-01", &readings(1.0)).unwrap();
        store.save(&ledger).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_updates_link_target() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.csv");
        let link = dir.path().join("prices.csv");
        fs::write(&real, header_line()).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let store = CsvLedgerFile::new(&link);
        let mut ledger = store.load().unwrap();
        ledger.merge("2022-01-01", &readings(1.0)).unwrap();
        store.save(&ledger).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap().lines().count(), 2);
        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn unsorted_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, format!("{}\n2022-01-02, 1\n2022-01-01, 1", header_line())).unwrap();

        let err = CsvLedgerFile::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn directory_in_place_of_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvLedgerFile::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
