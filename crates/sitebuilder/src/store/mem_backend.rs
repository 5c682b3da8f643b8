use super::KeyValueBackend;
use crate::error::{Result, SiteError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the builder is
/// single-threaded. This lets `KeyValueBackend` take `&self` everywhere.
#[derive(Debug, Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    failing_key: RefCell<Option<String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Fail writes to one key only, leaving the others working.
    pub fn set_failing_key(&self, key: Option<&str>) {
        *self.failing_key.borrow_mut() = key.map(str::to_string);
    }

    fn check_write(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SiteError::Store("Simulated write error".to_string()));
        }
        if self.failing_key.borrow().as_deref() == Some(key) {
            return Err(SiteError::Store(format!("Simulated write error on {}", key)));
        }
        Ok(())
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_write(key)?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_write(key)?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
