use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::error::{Result, StorageError};

/// String key-value capability the gateway is written against.
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Browser `localStorage`.
pub struct LocalStorageBackend {
    store: web_sys::Storage,
}

impl LocalStorageBackend {
    pub fn open() -> Result<Self> {
        let win = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no global `window`".into()))?;
        match win.local_storage() {
            Ok(Some(store)) => Ok(Self { store }),
            Ok(None) => Err(StorageError::Unavailable("localStorage is disabled".into())),
            Err(e) => Err(StorageError::Unavailable(format!("{:?}", e))),
        }
    }
}

impl KeyValueBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.store
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("get {}: {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.store
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("set {}: {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.store
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("remove {}: {:?}", key, e)))
    }
}

/// In-process map. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
