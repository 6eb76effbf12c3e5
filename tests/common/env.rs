//! Environment variable helpers for config tests.

use std::ffi::OsString;

/// RAII guard that sets an environment variable and restores it on drop.
///
/// Restores the original value (or removes the variable) even if a test
/// panics. Tests using this must be marked `#[serial]`.
pub struct EnvGuard {
    key: &'static str,
    original: Option<OsString>,
}

impl EnvGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var_os(key);
        // SAFETY: tests using EnvGuard are marked #[serial]
        unsafe { std::env::set_var(key, value) };
        Self { key, original }
    }

    pub fn remove(key: &'static str) -> Self {
        let original = std::env::var_os(key);
        // SAFETY: tests using EnvGuard are marked #[serial]
        unsafe { std::env::remove_var(key) };
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests using EnvGuard are marked #[serial]
        match &self.original {
            Some(val) => unsafe { std::env::set_var(self.key, val) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}
