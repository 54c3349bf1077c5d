use crate::error::Result;

/// Typed, dotted-path access to a reloadable configuration store.
///
/// Missing or mistyped keys yield the caller's default; only `reload` can
/// fail. Implementations decide where values live (file, memory, ...).
pub trait ConfigStore {
    fn load_str(&self, path: &str, default: &str) -> String;

    fn load_int(&self, path: &str, default: i32) -> i32;

    fn load_long(&self, path: &str, default: i64) -> i64;

    fn load_bool(&self, path: &str, default: bool) -> bool;

    /// Re-read the backing store. Current values are kept on failure.
    fn reload(&self) -> Result<()>;
}

/// A store with no backing data: every getter returns its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConfig;

impl ConfigStore for NullConfig {
    fn load_str(&self, _path: &str, default: &str) -> String {
        default.to_string()
    }

    fn load_int(&self, _path: &str, default: i32) -> i32 {
        default
    }

    fn load_long(&self, _path: &str, default: i64) -> i64 {
        default
    }

    fn load_bool(&self, _path: &str, default: bool) -> bool {
        default
    }

    fn reload(&self) -> Result<()> {
        Ok(())
    }
}
