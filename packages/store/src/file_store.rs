//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used by the desktop build to keep the
//! token pair across restarts. All entries live in one JSON object on disk:
//!
//! ```text
//! <base_dir>/
//! └── tokens.json      # {"access_token": "...", "refresh_token": "..."}
//! ```
//!
//! Use [`FileStore::in_data_dir`] to get the platform location:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/lims-console/` |
//! | Linux | `~/.local/share/lims-console/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\lims-console\` |

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::kv::KeyValueStore;

const FILE_NAME: &str = "tokens.json";
const APP_DIR: &str = "lims-console";

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store rooted at `<data_dir>/lims-console`, or `./lims-console` when the
    /// platform has no data directory.
    pub fn in_data_dir() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(base)
    }

    pub fn path(&self) -> PathBuf {
        self.base.join(FILE_NAME)
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let path = self.path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt {}: {}", path.display(), e);
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) {
        let path = self.path();
        if let Err(e) = write_json(&path, entries) {
            tracing::warn!("Failed to write {}: {}", path.display(), e);
        }
    }
}

fn write_json(path: &Path, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    let mut file = open_private(path)?;
    file.write_all(json.as_bytes())
}

/// Truncate or create `path`, readable only by the owner on unix.
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);

    let file = options.open(path)?;
    // The mode only applies on creation; tighten files left by older builds.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            self.write_entries(&entries);
        }
    }
}
