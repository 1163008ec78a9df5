use std::collections::HashMap;

use crate::errors::{Result, ShortenerError};
use crate::storage::{Storer, encoder};

/// Process-local key → value table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    links: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Storer for MemoryStore {
    fn add(&mut self, value: &str) -> Result<String> {
        // 先按值全表扫描，已存在则直接返回原 key
        if let Some((key, _)) = self.links.iter().find(|(_, v)| v.as_str() == value) {
            return Ok(key.clone());
        }

        // 哈希碰撞时直接覆盖旧记录
        let key = encoder::encode(value);
        self.links.insert(key.clone(), value.to_string());
        Ok(key)
    }

    fn get(&mut self, key: &str) -> Result<String> {
        self.links
            .get(key)
            .cloned()
            .ok_or_else(|| ShortenerError::not_found(format!("no URL stored for key '{}'", key)))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
