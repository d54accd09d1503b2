use crate::ui;
use crate::{log_debug, log_warn};
use anyhow::{Context, Result, anyhow};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Compresses the staging directory `<backup_root>/<stem>/` into
/// `<backup_root>/<stem>.zip` and removes the staging directory.
///
/// Entry names inside the archive are relative to the staging directory,
/// so extraction reproduces the manifest and the mirrored tree at the
/// archive root. The staging directory is only deleted after the archive
/// has been written completely; on failure it is left in place as the
/// source of truth and any partial archive file is removed best-effort.
///
/// # Returns
///
/// A Result containing the archive path or an error.
pub fn create_archive(backup_root: &Path, stem: &str, keep_staging: bool) -> Result<PathBuf> {
    let staging_dir = backup_root.join(stem);
    let archive_path = backup_root.join(format!("{stem}.zip"));

    log_debug!("Creating archive {:?} from {:?}", archive_path, staging_dir);
    let spinner = ui::create_spinner("Compressing snapshot...");
    let result = write_zip(&staging_dir, &archive_path);
    spinner.finish_and_clear();

    if let Err(e) = result {
        if archive_path.exists()
            && let Err(remove_err) = fs::remove_file(&archive_path)
        {
            log_warn!(
                "Could not remove partial archive {:?}: {}",
                archive_path,
                remove_err
            );
        }
        return Err(e).with_context(|| format!("Failed to create archive {}", archive_path.display()));
    }

    if keep_staging {
        log_debug!("Keeping staging directory {:?}", staging_dir);
    } else {
        fs::remove_dir_all(&staging_dir).with_context(|| {
            format!(
                "Archive created but staging directory could not be removed: {}",
                staging_dir.display()
            )
        })?;
    }

    Ok(archive_path)
}

fn write_zip(staging_dir: &Path, archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path)
        .with_context(|| format!("failed to create {}", archive_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let base_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(staging_dir) {
        let entry = entry.context("failed to walk staging directory")?;
        let path = entry.path();
        if path == staging_dir {
            continue;
        }

        let name = entry_name(path.strip_prefix(staging_dir)?)?;
        let options = entry_options(base_options, &entry)?;

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else if entry.file_type().is_file() {
            zip.start_file(name, options)?;
            let mut source = File::open(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            io::copy(&mut source, &mut zip)?;
        }
    }

    zip.finish()?;
    Ok(())
}

/// Archive-internal entry name: forward-slash separated, relative to the
/// staging directory.
fn entry_name(relative: &Path) -> Result<String> {
    let parts: Vec<&str> = relative
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .ok_or_else(|| anyhow!("non-UTF-8 path in staging directory: {:?}", relative))
        })
        .collect::<Result<_>>()?;
    Ok(parts.join("/"))
}

#[cfg(unix)]
fn entry_options(
    base: SimpleFileOptions,
    entry: &walkdir::DirEntry,
) -> Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;
    let mode = entry.metadata().context("failed to stat entry")?.permissions().mode();
    Ok(base.unix_permissions(mode))
}

#[cfg(not(unix))]
fn entry_options(
    base: SimpleFileOptions,
    _entry: &walkdir::DirEntry,
) -> Result<SimpleFileOptions> {
    Ok(base)
}
