use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use toml::Value;
use tracing::{info, warn};

use helm_core::{ConfigStore, HelmError, Result};

/// A reloadable, TOML-backed configuration store.
///
/// Keys are dotted paths into nested tables ("ie.help.commands_per_page").
/// Missing or mistyped keys fall back to the caller's default; only `reload`
/// can fail, and a failed reload keeps the current values.
pub struct TomlStore {
    path: PathBuf,
    root: RwLock<Value>,
}

impl TomlStore {
    /// Open a store from a TOML file. A missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let root = if path.exists() {
            info!(?path, "loading configuration");
            Self::parse_file(&path)?
        } else {
            warn!(?path, "config file not found, starting empty");
            Value::Table(toml::map::Map::new())
        };
        Ok(Self {
            path,
            root: RwLock::new(root),
        })
    }

    /// Path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_file(path: &Path) -> Result<Value> {
        let raw = std::fs::read_to_string(path)?;
        raw.parse::<Value>()
            .map_err(|e| HelmError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    fn lookup(&self, path: &str) -> Option<Value> {
        let root = self.root.read();
        let mut node = &*root;
        for segment in path.split('.') {
            node = node.get(segment)?;
        }
        Some(node.clone())
    }
}

impl ConfigStore for TomlStore {
    fn load_str(&self, path: &str, default: &str) -> String {
        match self.lookup(path) {
            Some(Value::String(s)) => s,
            _ => default.to_string(),
        }
    }

    fn load_int(&self, path: &str, default: i32) -> i32 {
        match self.lookup(path) {
            Some(Value::Integer(n)) => i32::try_from(n).unwrap_or(default),
            _ => default,
        }
    }

    fn load_long(&self, path: &str, default: i64) -> i64 {
        match self.lookup(path) {
            Some(Value::Integer(n)) => n,
            _ => default,
        }
    }

    fn load_bool(&self, path: &str, default: bool) -> bool {
        match self.lookup(path) {
            Some(Value::Boolean(b)) => b,
            _ => default,
        }
    }

    fn reload(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(HelmError::Config(format!(
                "config file not found: {}",
                self.path.display()
            )));
        }
        let fresh = Self::parse_file(&self.path)?;
        *self.root.write() = fresh;
        info!(path = ?self.path, "configuration reloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_from(content: &str) -> (tempfile::TempDir, TomlStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let store = TomlStore::open(&path).unwrap();
        (dir, store)
    }

    #[test]
    fn typed_getters_with_dotted_paths() {
        let (_dir, store) = store_from(
            "[ie.help]\ncommands_per_page = 6\n[ie]\nmotd = \"hi\"\nenabled = false\nbig = 5000000000\n",
        );
        assert_eq!(store.load_int("ie.help.commands_per_page", 0), 6);
        assert_eq!(store.load_str("ie.motd", "?"), "hi");
        assert!(!store.load_bool("ie.enabled", true));
        assert_eq!(store.load_long("ie.big", 0), 5_000_000_000);
    }

    #[test]
    fn missing_or_mistyped_keys_fall_back() {
        let (_dir, store) = store_from("[ie]\ncount = \"not a number\"\n");
        assert_eq!(store.load_int("ie.count", 7), 7);
        assert_eq!(store.load_int("ie.nope", 3), 3);
        assert_eq!(store.load_str("ie.count", "x"), "not a number");
        assert!(store.load_bool("ie.missing", true));
    }

    #[test]
    fn reload_picks_up_changes() {
        let (dir, store) = store_from("[ie]\nvalue = 1\n");
        assert_eq!(store.load_int("ie.value", 0), 1);
        std::fs::write(dir.path().join("commands.toml"), "[ie]\nvalue = 2\n").unwrap();
        store.reload().unwrap();
        assert_eq!(store.load_int("ie.value", 0), 2);
    }

    #[test]
    fn failed_reload_keeps_current_values() {
        let (dir, store) = store_from("[ie]\nvalue = 1\n");
        std::fs::write(dir.path().join("commands.toml"), "[ie\nbroken").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.load_int("ie.value", 0), 1);
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlStore::open(dir.path().join("nope.toml")).unwrap();
        assert_eq!(store.load_int("a.b", 9), 9);
        assert!(store.reload().is_err());
    }
}
