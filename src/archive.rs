//! Zip bundling of converted CSV tables.
//!
//! Bundles the main and sub directories' files per table kind into one
//! zip archive each, named after the first main file of that kind.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{info, warn};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::error::{BillError, Result};
use crate::models::SegmentKind;

/// Bundle the per-kind CSV files from `main_dir` and `sub_dir` into zip
/// archives under `destination`. Returns the archives written; kinds with
/// no main file are skipped with a warning.
pub fn archive_directories(
    main_dir: &Path,
    sub_dir: &Path,
    destination: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(destination)?;

    let mut archives = Vec::new();
    for kind in SegmentKind::ALL {
        let main_files = matching_files(main_dir, kind)?;
        let sub_files = matching_files(sub_dir, kind)?;

        let Some(first_main) = main_files.first() else {
            warn!("No {} files found in {}", kind.file_tag(), main_dir.display());
            continue;
        };

        let archive_path = destination.join(archive_name(first_main));
        let mut files = main_files.clone();
        files.extend(sub_files);

        bundle(&files, &archive_path)?;
        info!(
            "Bundled {} files into {}",
            files.len(),
            archive_path.display()
        );
        archives.push(archive_path);
    }

    Ok(archives)
}

/// Write the given files into one zip archive, entries under bare names
fn bundle(files: &[PathBuf], destination: &Path) -> Result<()> {
    let file = File::create(destination)?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| BillError::MergeFailed {
                reason: format!("{} has no file name", path.display()),
            })?;
        writer.start_file(name, options)?;
        writer.write_all(&std::fs::read(path)?)?;
    }

    writer.finish()?;
    Ok(())
}

fn archive_name(main_file: &Path) -> String {
    let name = main_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "tables.csv".to_string());
    name.replace(".csv", ".zip")
}

/// CSV files in `dir` whose name carries the kind's pattern, sorted
fn matching_files(dir: &Path, kind: SegmentKind) -> Result<Vec<PathBuf>> {
    let pattern = dir
        .join(format!("*{}*.csv", kind.file_pattern()))
        .to_string_lossy()
        .to_string();
    let mut files: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| BillError::MergeFailed {
            reason: format!("invalid file pattern {pattern:?}: {e}"),
        })?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}
