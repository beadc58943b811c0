//! Whole-file CSV rewrites with atomic visibility.
//!
//! The catalog and ledger are rewritten in full on every mutation. The
//! rewrite lands in a sibling `.tmp` file first and is renamed over the
//! destination, so a concurrent reader sees either the old file or the new
//! one, never a half-written store.

use std::fs::{self, File};
use std::path::Path;

use crate::error::StoreResult;

/// Rewrites `path` with a header row followed by whatever `write_rows`
/// serializes, through a temp file and an atomic rename.
///
/// The header is written explicitly (not via serde) so an empty store still
/// gets its header row.
pub(crate) fn rewrite_csv<F>(path: &Path, header: &[&str], write_rows: F) -> StoreResult<()>
where
    F: FnOnce(&mut csv::Writer<File>) -> Result<(), csv::Error>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(header)?;
        write_rows(&mut writer)?;
        writer.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rewrite_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        rewrite_csv(&path, &["Name", "Price"], |_| Ok(())).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "Name,Price");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn rewrite_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.csv");

        rewrite_csv(&path, &["Name", "Price"], |w| {
            w.write_record(["Apple", "1.00"])
        })
        .unwrap();
        rewrite_csv(&path, &["Name", "Price"], |w| {
            w.write_record(["Bread", "1.80"])
        })
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Bread"));
        assert!(!content.contains("Apple"));
    }
}
