//! Installation of the bundled dictionaries into the per-user home.
//!
//! Deployments that pass an absolute dictionary path never reach this code.
//! Relative paths are resolved against `~/.lemma-engine`, which is populated
//! from the bundled `dicts` directory on first use and left alone afterwards.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::DictError;

const HOME_DIR_NAME: &str = ".lemma-engine";
const BUNDLED_ENV: &str = "LEMMA_DICTS";
/// Set to log where the bundled dictionaries get installed.
pub const DEBUG_ENV: &str = "DEBUG";

#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Dictionary home. Defaults to `$HOME/.lemma-engine`.
    pub home: Option<PathBuf>,
    /// Directory holding the bundled dictionaries. Defaults to
    /// `$LEMMA_DICTS`, then `./dicts`.
    pub bundled: Option<PathBuf>,
}

impl InstallOptions {
    /// The dictionary home these options point at.
    pub fn resolve_home(&self) -> Result<PathBuf, DictError> {
        match &self.home {
            Some(home) => Ok(home.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(HOME_DIR_NAME))
                .ok_or(DictError::NoHomeDir),
        }
    }

    fn bundled(&self) -> PathBuf {
        self.bundled
            .clone()
            .or_else(|| env::var_os(BUNDLED_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("dicts"))
    }
}

/// Absolute paths pass through; relative ones are resolved inside the
/// (installed) dictionary home.
pub fn resolve_dict_path(path: &Path, opts: &InstallOptions) -> Result<PathBuf, DictError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let home = install_dicts(opts)?;
    Ok(home.join(path))
}

/// Copy the bundled dictionaries into the home unless it already exists.
/// Returns the home path.
pub fn install_dicts(opts: &InstallOptions) -> Result<PathBuf, DictError> {
    let home = opts.resolve_home()?;
    if home.exists() {
        return Ok(home);
    }

    let bundled = opts.bundled();
    if !bundled.is_dir() {
        return Err(DictError::MissingBundle(bundled));
    }

    if env::var_os(DEBUG_ENV).is_some() {
        info!(
            "default dictionaries are going to be installed to: {}",
            home.display()
        );
    }
    copy_dir(&bundled, &home)?;
    Ok(home)
}

fn copy_dir(from: &Path, to: &Path) -> Result<(), DictError> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
