//! File system utilities for bundling.
//!
//! Provides idempotent directory creation and regular-file copies that
//! report the number of bytes written.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};

/// Permission bits applied to bundle executables and the descriptor.
#[cfg(unix)]
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Creates `path` and all missing parents.
///
/// Succeeds when the directory already exists; existing contents are left alone.
/// Fails with [`Error::DirectoryCreation`] when the directory cannot be created
/// or the path is occupied by something that is not a directory.
pub async fn try_ensure_dir(path: &Path) -> Result<()> {
    // create_dir_all is already idempotent - succeeds even if dir exists
    match fs::create_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(error) => Err(Error::DirectoryCreation {
            path: path.to_path_buf(),
            error,
        }),
    }
}

/// Boolean form of [`try_ensure_dir`]: whether `path` is a directory after the call.
pub async fn ensure_dir(path: &Path) -> bool {
    match try_ensure_dir(path).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{e}");
            false
        }
    }
}

/// Copies a regular file, replacing the destination, and returns the bytes copied.
///
/// Symlinks are followed. Fails with [`Error::NotRegularFile`] before touching the
/// destination if the source is a directory, a dangling symlink or a special file,
/// and with [`Error::SameFile`] if both paths name the same file.
/// Parent directories of `to` are not created.
pub async fn copy_regular_file(from: &Path, to: &Path) -> Result<u64> {
    let metadata = match fs::metadata(from).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound && is_symlink(from).await => {
            return Err(Error::NotRegularFile {
                path: from.to_path_buf(),
            });
        }
        Err(e) => return Err(e).fs_context("reading metadata of", from),
    };

    if !metadata.is_file() {
        return Err(Error::NotRegularFile {
            path: from.to_path_buf(),
        });
    }

    // Creating the destination truncates it
    if is_same_file(from, to).await {
        return Err(Error::SameFile {
            path: from.to_path_buf(),
        });
    }

    let mut source = File::open(from).await.fs_context("opening", from)?;
    let mut destination = File::create(to).await.fs_context("creating", to)?;

    let copied = tokio::io::copy(&mut source, &mut destination)
        .await
        .fs_context("copying into", to)?;
    destination.flush().await.fs_context("flushing", to)?;

    log::debug!("Copied {} bytes {} -> {}", copied, from.display(), to.display());
    Ok(copied)
}

/// Writes `contents` to `path`, truncating any existing file.
pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).await.fs_context("writing", path)
}

/// Sets rwxr-xr-x on `path`. No-op on platforms without unix permissions.
pub async fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(EXECUTABLE_MODE))
            .await
            .fs_context("failed to set executable permissions", path)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

async fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .await
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}
