//! klinevault-fs
//!
//! `ArchiveStore` over a local directory tree laid out with the vendor's
//! path convention. Each chunk is a zip archive holding one CSV member.
#![warn(missing_docs)]

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use klinevault_core::{ArchiveLocator, ArchiveStore, VaultError};
use zip::ZipArchive;
use zip::result::ZipError;

/// Archive store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsArchiveStore {
    root: PathBuf,
}

impl FsArchiveStore {
    /// Store name used in errors and logs.
    pub const NAME: &'static str = "klinevault-fs";

    /// Open a store rooted at `root`.
    ///
    /// # Errors
    /// Returns `Configuration` if `root` does not exist or is not a
    /// directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, VaultError> {
        let root = root.as_ref();
        let display = root.display().to_string();
        match root.metadata() {
            Ok(m) if m.is_dir() => Ok(Self {
                root: root.to_path_buf(),
            }),
            Ok(_) => Err(VaultError::configuration(display, "not a directory")),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VaultError::configuration(display, "not found"))
            }
            Err(e) => Err(VaultError::configuration(display, e.to_string())),
        }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the archive for `locator`.
    #[must_use]
    pub fn archive_path(&self, locator: &ArchiveLocator) -> PathBuf {
        self.root.join(locator.relative_path())
    }

    fn io_error(e: &io::Error) -> VaultError {
        VaultError::store(Self::NAME, e.to_string())
    }

    /// Structural zip problems and truncated or undecodable data are
    /// corruption; anything else is a store failure.
    fn normalize_zip_error(e: ZipError, locator: &ArchiveLocator) -> VaultError {
        match e {
            ZipError::Io(io) if is_data_io_error(&io) => {
                VaultError::corrupt(locator.to_string(), io.to_string())
            }
            ZipError::Io(io) => Self::io_error(&io),
            other => VaultError::corrupt(locator.to_string(), other.to_string()),
        }
    }
}

fn is_data_io_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput
    )
}

impl ArchiveStore for FsArchiveStore {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "klinevault_fs::open_member",
            level = "trace",
            skip(self, locator),
            fields(locator = %locator),
        )
    )]
    fn open_member(
        &self,
        locator: &ArchiveLocator,
        member: &str,
    ) -> Result<Option<Vec<u8>>, VaultError> {
        let path = self.archive_path(locator);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&e)),
        };
        if file.metadata().map_err(|e| Self::io_error(&e))?.is_dir() {
            return Err(VaultError::corrupt(locator.to_string(), "is a directory"));
        }

        let mut archive =
            ZipArchive::new(file).map_err(|e| Self::normalize_zip_error(e, locator))?;
        let mut entry = match archive.by_name(member) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(VaultError::corrupt(
                    locator.to_string(),
                    format!("member {member} not found"),
                ));
            }
            Err(e) => return Err(Self::normalize_zip_error(e, locator)),
        };

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(|e| {
            if is_data_io_error(&e) {
                VaultError::corrupt(locator.to_string(), e.to_string())
            } else {
                Self::io_error(&e)
            }
        })?;
        Ok(Some(bytes))
    }
}
