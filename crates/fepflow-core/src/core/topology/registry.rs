use crate::core::forcefields::{
    DEFAULT_FORCEFIELD, GromacsSolventModel, GromacsWaterModel, get_forcefield,
};
use directories::ProjectDirs;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable that relocates the topology directory.
pub const TOPDIR_ENV: &str = "FEPFLOW_TOPDIR";

/// Suffix of force-field directories inside the topology directory.
const FORCEFIELD_DIR_SUFFIX: &str = ".ff";

static TOPFILES: OnceCell<TopFiles> = OnceCell::new();

/// Bundled topology files, keyed by file name, resolved to absolute paths.
///
/// Files inside a `*.ff` directory are registered both by their bare name and
/// as `<dir>.ff/<name>`. A bare name that is already taken keeps its first
/// registration. Top-level files come first, then the default force field's
/// directory, then the remaining `*.ff` directories in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopFiles {
    root: PathBuf,
    files: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Topology file '{name}' is not bundled in '{root}'")]
    MissingFile { name: String, root: String },
}

impl TopFiles {
    pub fn scan(root: &Path) -> Result<Self, TopologyError> {
        let root = std::fs::canonicalize(root).map_err(|e| io_error(root, e))?;
        debug!("Scanning topology directory {:?}", root);

        let mut files = BTreeMap::new();
        let mut forcefield_dirs = Vec::new();

        for (name, path) in list_dir(&root)? {
            if path.is_dir() && name.ends_with(FORCEFIELD_DIR_SUFFIX) {
                forcefield_dirs.push((name.clone(), path.clone()));
            }
            files.insert(name, path);
        }

        let default_dir = get_forcefield(DEFAULT_FORCEFIELD)
            .map(|ff| ff.directory)
            .unwrap_or_default();
        forcefield_dirs.sort_by_key(|(name, _)| (name != default_dir, name.clone()));
        for (dir_name, dir_path) in forcefield_dirs {
            for (name, path) in list_dir(&dir_path)? {
                if path.is_dir() {
                    continue;
                }
                files.insert(format!("{}/{}", dir_name, name), path.clone());
                files.entry(name).or_insert(path);
            }
        }

        debug!("Registered {} topology entries", files.len());
        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.files.get(name).map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn path(&self, name: &str) -> Result<&Path, TopologyError> {
        self.get(name).ok_or_else(|| TopologyError::MissingFile {
            name: name.to_string(),
            root: self.root.to_string_lossy().to_string(),
        })
    }

    /// Resolves `name` inside `directory` first (`<directory>/<name>`), then
    /// by its bare name.
    pub fn resolve(&self, name: &str, directory: Option<&str>) -> Result<&Path, TopologyError> {
        directory
            .and_then(|dir| self.get(&format!("{}/{}", dir, name)))
            .map_or_else(|| self.path(name), Ok)
    }

    pub fn read_to_string(&self, name: &str) -> Result<String, TopologyError> {
        let path = self.path(name)?;
        std::fs::read_to_string(path).map_err(|e| io_error(path, e))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// The topology directory: `$FEPFLOW_TOPDIR` when set and non-empty, else
/// the crate's `data/top`.
///
/// The crate directory is fixed at build time. A binary installed away from
/// its source tree falls back to `top/` under the per-user data directory
/// (e.g. `~/.local/share/fepflow/top` on Linux), where the topology files
/// have to be copied, unless `$FEPFLOW_TOPDIR` points elsewhere.
pub fn default_topdir() -> PathBuf {
    match std::env::var_os(TOPDIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let bundled = bundled_topdir();
            if bundled.is_dir() {
                return bundled;
            }
            debug!("{:?} is not available; using the user data directory", bundled);
            ProjectDirs::from("org", "fepflow", "fepflow")
                .map(|dirs| dirs.data_dir().join("top"))
                .unwrap_or(bundled)
        }
    }
}

fn bundled_topdir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("top")
}

/// The process-wide registry, scanned from [`default_topdir`] on first use.
pub fn topfiles() -> Result<&'static TopFiles, TopologyError> {
    TOPFILES.get_or_try_init(|| TopFiles::scan(&default_topdir()))
}

/// Checks a water model's files against the process-wide registry.
pub fn check_water_model_files(model: &GromacsWaterModel) -> Result<(), TopologyError> {
    model.check_files(topfiles()?)
}

/// Checks a solvent model's files against the process-wide registry.
pub fn check_solvent_model_files(model: &GromacsSolventModel) -> Result<(), TopologyError> {
    model.check_files(topfiles()?)
}

fn list_dir(dir: &Path) -> Result<Vec<(String, PathBuf)>, TopologyError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    let mut listed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let name = entry.file_name().to_string_lossy().to_string();
        listed.push((name, entry.path()));
    }
    listed.sort();
    Ok(listed)
}

fn io_error(path: &Path, source: std::io::Error) -> TopologyError {
    TopologyError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    }
}
