//! 持久化存储模块
//!
//! 定义键值存储契约与答题历史仓储：
//! - `KeyValueStore`: get/set/remove 的键值契约
//! - `MemoryStore`: 内存实现（用于测试与无持久化场景）
//! - `AttemptHistoryRepository`: 固定键下的答题历史读写
//!
//! 存储失败从不向上传播：读取失败视为无历史，写入失败跳过本次保存，
//! 均只记录警告日志。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::types::AttemptRecord;

/// 答题历史的存储键
pub const HISTORY_KEY: &str = "numeri.attempt-history";

// ============================================================
// 错误类型定义
// ============================================================

/// 存储模块错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("lock error: {0}")]
    Lock(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================
// KeyValueStore - 键值存储契约
// ============================================================

/// 键值存储契约
///
/// 与浏览器 localStorage 同形：按键读取、写入、删除字符串值。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// 内存键值存储
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// 共享存储句柄：多个持有者访问同一底层存储
impl<S: KeyValueStore> KeyValueStore for Arc<Mutex<S>> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let mut guard = self.lock().map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.remove(key)
    }
}

// ============================================================
// AttemptHistoryRepository - 答题历史仓储
// ============================================================

/// 答题历史仓储
///
/// 将完整的答题记录序列化为 JSON 存入 [`HISTORY_KEY`]。
/// 启动时读取一次，日志每次变更后整体写回。
pub struct AttemptHistoryRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> AttemptHistoryRepository<S> {
    /// 创建新的仓储实例
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 读取历史；任何失败都视为无历史
    pub fn load(&self) -> Vec<AttemptRecord> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("failed to read attempt history: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("stored attempt history is malformed, starting fresh: {}", e);
                Vec::new()
            }
        }
    }

    /// 写回完整历史；失败时跳过本次保存
    pub fn save(&mut self, records: &[AttemptRecord]) {
        let payload = match serde_json::to_string(records) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("failed to serialize attempt history: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(HISTORY_KEY, &payload) {
            log::warn!("failed to save attempt history: {}", e);
        }
    }

    /// 删除持久化的历史
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            log::warn!("failed to clear attempt history: {}", e);
        }
    }
}
