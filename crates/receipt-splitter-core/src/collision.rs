//! Collision-safe numbering of output files.
//!
//! Given a base name, the resolver picks `{base}.{ext}` when nothing with that
//! base exists yet and `{base}_{n}.{ext}` otherwise, where `n` is one more than
//! the largest suffix already taken.
//!
//! [`CollisionIndex`] keeps one listing per output directory in memory. The
//! listing is read from disk the first time a directory is used and is then
//! updated through [`CollisionIndex::record`] after each successful write.
//! Resolution never reserves a name, so resolving twice without a recorded
//! write returns the same path.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::CoreError;

/// Pattern matching `base`, an optional `_<digits>` suffix, and `ext`.
///
/// Capture group 1 holds the suffix digits when present.
pub fn suffix_pattern(base: &str, ext: &str) -> Result<Regex, CoreError> {
    let src = format!(
        r"^{}(?:_([0-9]+))?\.{}$",
        regex::escape(base),
        regex::escape(ext)
    );
    Ok(Regex::new(&src)?)
}

/// Pick the next free file name for `base` among `existing` file names.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPattern`] if the escaped base name exceeds the
/// regex size limit.
pub fn next_file_name<'a, I>(existing: I, base: &str, ext: &str) -> Result<String, CoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern = suffix_pattern(base, ext)?;
    let mut matched = false;
    let mut highest: u64 = 0;

    for name in existing {
        let Some(caps) = pattern.captures(name) else {
            continue;
        };
        matched = true;
        if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) {
            highest = highest.max(n);
        }
    }

    if matched {
        Ok(format!("{base}_{}.{ext}", highest.saturating_add(1)))
    } else {
        Ok(format!("{base}.{ext}"))
    }
}

/// Resolve against a fresh listing of `dir`, creating the directory first.
///
/// Every call re-reads the directory. Prefer [`CollisionIndex`] when several
/// pages go to the same directory.
///
/// # Errors
///
/// Returns [`CoreError::Io`] if the directory cannot be created or listed.
pub fn resolve_from_disk(dir: &Path, base: &str, ext: &str) -> Result<PathBuf, CoreError> {
    fs::create_dir_all(dir)?;
    let names = list_file_names(dir)?;
    let file = next_file_name(names.iter().map(String::as_str), base, ext)?;
    Ok(dir.join(file))
}

fn list_file_names(dir: &Path) -> Result<BTreeSet<String>, CoreError> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Non-UTF-8 names can never equal a synthesized name.
        if let Some(name) = entry.file_name().to_str() {
            names.insert(name.to_string());
        }
    }
    Ok(names)
}

/// Run-scoped index of file names per output directory.
#[derive(Debug, Default)]
pub struct CollisionIndex {
    dirs: HashMap<PathBuf, BTreeSet<String>>,
}

impl CollisionIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the output path for `base` in `dir`.
    ///
    /// The directory is created and listed the first time it is seen.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the directory cannot be created or listed.
    pub fn resolve(&mut self, dir: &Path, base: &str, ext: &str) -> Result<PathBuf, CoreError> {
        let names = self.listing(dir)?;
        let file = next_file_name(names.iter().map(String::as_str), base, ext)?;
        Ok(dir.join(file))
    }

    /// Record a file that was successfully written.
    ///
    /// Paths in directories the index has not listed yet are ignored; the
    /// first resolution there reads the file from disk anyway.
    pub fn record(&mut self, path: &Path) {
        let (Some(dir), Some(name)) = (path.parent(), path.file_name().and_then(|n| n.to_str()))
        else {
            return;
        };
        if let Some(names) = self.dirs.get_mut(dir) {
            names.insert(name.to_string());
        }
    }

    /// Number of file names known for `dir`, if it has been listed.
    pub fn known_files(&self, dir: &Path) -> Option<usize> {
        self.dirs.get(dir).map(BTreeSet::len)
    }

    fn listing(&mut self, dir: &Path) -> Result<&BTreeSet<String>, CoreError> {
        if !self.dirs.contains_key(dir) {
            fs::create_dir_all(dir)?;
            let names = list_file_names(dir)?;
            self.dirs.insert(dir.to_path_buf(), names);
        }
        Ok(&self.dirs[dir])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_returns_plain_name() {
        let name = next_file_name(["other.pdf"], "Ana 5,00", "pdf").unwrap();
        assert_eq!(name, "Ana 5,00.pdf");
    }

    #[test]
    fn plain_match_returns_suffix_one() {
        let name = next_file_name(["Ana 5,00.pdf"], "Ana 5,00", "pdf").unwrap();
        assert_eq!(name, "Ana 5,00_1.pdf");
    }

    #[test]
    fn highest_suffix_wins() {
        let existing = ["x.pdf", "x_2.pdf", "x_10.pdf", "x_3.pdf"];
        assert_eq!(next_file_name(existing, "x", "pdf").unwrap(), "x_11.pdf");
    }

    #[test]
    fn suffixed_without_plain_still_counts() {
        assert_eq!(next_file_name(["x_4.pdf"], "x", "pdf").unwrap(), "x_5.pdf");
    }

    #[test]
    fn similar_names_do_not_collide() {
        let existing = ["x 1.pdf", "xy.pdf", "x_a.pdf", "x.pdf.bak", "X.pdf", "x.PDF"];
        assert_eq!(next_file_name(existing, "x", "pdf").unwrap(), "x.pdf");
    }

    #[test]
    fn base_name_metacharacters_are_escaped() {
        let existing = ["1.234,56.pdf", "1x234,56_7.pdf"];
        assert_eq!(
            next_file_name(existing, "1.234,56", "pdf").unwrap(),
            "1.234,56_1.pdf"
        );
    }

    #[test]
    fn resolve_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        let mut index = CollisionIndex::new();
        let path = index.resolve(&dir, "x", "pdf").unwrap();
        assert!(dir.is_dir());
        assert_eq!(path, dir.join("x.pdf"));
    }

    #[test]
    fn resolve_is_idempotent_without_record() {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = CollisionIndex::new();
        let a = index.resolve(tmp.path(), "x", "pdf").unwrap();
        let b = index.resolve(tmp.path(), "x", "pdf").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn record_advances_numbering() {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = CollisionIndex::new();
        for n in 0..4u32 {
            let path = index.resolve(tmp.path(), "Maria Souza 100,00", "pdf").unwrap();
            let expected = if n == 0 {
                "Maria Souza 100,00.pdf".to_string()
            } else {
                format!("Maria Souza 100,00_{n}.pdf")
            };
            assert_eq!(path.file_name().unwrap().to_str().unwrap(), expected);
            index.record(&path);
        }
        assert_eq!(index.known_files(tmp.path()), Some(4));
    }

    #[test]
    fn index_sees_files_already_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("x.pdf"), b"").unwrap();
        fs::write(tmp.path().join("x_1.pdf"), b"").unwrap();
        let mut index = CollisionIndex::new();
        let path = index.resolve(tmp.path(), "x", "pdf").unwrap();
        assert_eq!(path, tmp.path().join("x_2.pdf"));
    }

    #[test]
    fn record_in_unlisted_directory_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let mut index = CollisionIndex::new();
        index.record(&tmp.path().join("x.pdf"));
        assert_eq!(index.known_files(tmp.path()), None);
    }

    #[test]
    fn resolve_from_disk_relists_every_call() {
        let tmp = tempfile::tempdir().unwrap();
        let first = resolve_from_disk(tmp.path(), "x", "pdf").unwrap();
        assert_eq!(first, tmp.path().join("x.pdf"));
        fs::write(&first, b"").unwrap();
        let second = resolve_from_disk(tmp.path(), "x", "pdf").unwrap();
        assert_eq!(second, tmp.path().join("x_1.pdf"));
    }
}
