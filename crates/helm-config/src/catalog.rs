use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use toml::Value;
use tracing::{debug, info, warn};

use helm_core::{HelmError, MessageSource, Result, Sender, apply_placeholders};

/// A locale-aware message catalog backed by a directory of `<locale>.toml`
/// files.
///
/// Lookup order: the locale of the sender's physical actor (when present),
/// then the default locale, then the caller-supplied default text. Files that
/// fail to parse are skipped with a warning so one bad locale never takes the
/// whole catalog down.
pub struct MessageCatalog {
    dir: PathBuf,
    default_locale: String,
    locales: RwLock<HashMap<String, Value>>,
}

impl MessageCatalog {
    /// Load every `<locale>.toml` in `dir`. A missing directory yields an
    /// empty catalog (every lookup falls back to defaults).
    pub fn load(dir: impl AsRef<Path>, default_locale: impl Into<String>) -> Result<Self> {
        let catalog = Self {
            dir: dir.as_ref().to_path_buf(),
            default_locale: default_locale.into(),
            locales: RwLock::new(HashMap::new()),
        };
        catalog.reload()?;
        Ok(catalog)
    }

    /// Re-scan the catalog directory.
    pub fn reload(&self) -> Result<()> {
        let mut fresh = HashMap::new();
        if !self.dir.exists() {
            debug!(dir = ?self.dir, "message directory does not exist, catalog is empty");
            *self.locales.write() = fresh;
            return Ok(());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            HelmError::Catalog(format!("failed to read {}: {}", self.dir.display(), e))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| HelmError::Catalog(e.to_string()))?;
            let path = entry.path();
            if path.extension().is_none_or(|e| e != "toml") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match std::fs::read_to_string(&path)
                .map_err(HelmError::from)
                .and_then(|raw| {
                    raw.parse::<Value>()
                        .map_err(|e| HelmError::Catalog(e.to_string()))
                }) {
                Ok(table) => {
                    info!(locale, path = ?path, "loaded message locale");
                    fresh.insert(locale.to_string(), table);
                }
                Err(e) => {
                    warn!(path = ?path, error = %e, "failed to load message locale");
                }
            }
        }
        *self.locales.write() = fresh;
        Ok(())
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn locale_for(&self, sender: Option<&dyn Sender>) -> String {
        sender
            .and_then(|s| s.as_actor())
            .and_then(|a| a.locale())
            .unwrap_or(&self.default_locale)
            .to_string()
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<Value> {
        let locales = self.locales.read();
        let mut node = locales.get(locale)?;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        Some(node.clone())
    }

    /// Lookup in the sender's locale, falling back to the default locale.
    fn lookup_for(&self, sender: Option<&dyn Sender>, key: &str) -> Option<Value> {
        let locale = self.locale_for(sender);
        self.lookup(&locale, key).or_else(|| {
            if locale != self.default_locale {
                self.lookup(&self.default_locale, key)
            } else {
                None
            }
        })
    }
}

impl MessageSource for MessageCatalog {
    fn resolve(
        &self,
        key: &str,
        default: &str,
        sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> String {
        let text = match self.lookup_for(sender, key) {
            Some(Value::String(s)) => s,
            _ => default.to_string(),
        };
        apply_placeholders(&text, placeholders)
    }

    fn resolve_list(
        &self,
        key: &str,
        default: &[&str],
        sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> Vec<String> {
        let lines: Vec<String> = match self.lookup_for(sender, key) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => default.iter().map(|s| s.to_string()).collect(),
        };
        lines
            .iter()
            .map(|line| apply_placeholders(line, placeholders))
            .collect()
    }
}
