//! 内存存储后端 - 离线/测试用，按 scope:key 组织数据

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{Asset, AssetKind, Project, ProjectStore, StoreError};
use crate::wizard::WizardStep;

/// 数据作用域常量
pub struct MemoryScope;

impl MemoryScope {
    pub const PROJECT: &'static str = "project";
    pub const STEP: &'static str = "step";
    pub const ASSET: &'static str = "asset";
}

/// 内存存储
///
/// 进程内HashMap模拟远端存储的读写语义，键形如
/// `scope:projectId:name`。额外维护每个键的写入计数，
/// 供测试验证"未变更不重写"的行为。
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
    write_counts: RwLock<HashMap<String, u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            write_counts: RwLock::new(HashMap::new()),
        }
    }

    fn full_key(scope: &str, project: Uuid, name: &str) -> String {
        format!("{}:{}:{}", scope, project, name)
    }

    /// 写入项目记录（模拟外部服务已有的项目）
    pub async fn put_project(&self, project: &Project) {
        let key = Self::full_key(MemoryScope::PROJECT, project.id, "record");
        let serialized = serde_json::to_value(project).unwrap_or(Value::Null);
        self.data.write().await.insert(key, serialized);
    }

    /// 预置某步骤的历史载荷
    pub async fn seed_step(&self, project: Uuid, step: WizardStep, payload: Value) {
        let key = Self::full_key(MemoryScope::STEP, project, step.as_str());
        self.data.write().await.insert(key, payload);
    }

    /// 预置某类型的历史资产
    pub async fn seed_asset(
        &self,
        project: Uuid,
        kind: AssetKind,
        content: &str,
        metadata: Option<Value>,
    ) {
        let key = Self::full_key(MemoryScope::ASSET, project, kind.as_str());
        let asset = Asset {
            content: content.to_string(),
            metadata,
        };
        let serialized = serde_json::to_value(&asset).unwrap_or(Value::Null);
        self.data.write().await.insert(key, serialized);
    }

    /// 某步骤累计写入次数
    pub async fn step_write_count(&self, project: Uuid, step: WizardStep) -> u64 {
        let key = Self::full_key(MemoryScope::STEP, project, step.as_str());
        *self.write_counts.read().await.get(&key).unwrap_or(&0)
    }

    /// 某资产类型累计写入次数
    pub async fn asset_write_count(&self, project: Uuid, kind: AssetKind) -> u64 {
        let key = Self::full_key(MemoryScope::ASSET, project, kind.as_str());
        *self.write_counts.read().await.get(&key).unwrap_or(&0)
    }

    /// 读取某步骤当前存储的载荷（测试断言用）
    pub async fn stored_step(&self, project: Uuid, step: WizardStep) -> Option<Value> {
        let key = Self::full_key(MemoryScope::STEP, project, step.as_str());
        self.data.read().await.get(&key).cloned()
    }

    async fn bump_write_count(&self, key: &str) {
        let mut counts = self.write_counts.write().await;
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn fetch_project(&self, project: Uuid) -> Result<Option<Project>, StoreError> {
        let key = Self::full_key(MemoryScope::PROJECT, project, "record");
        let data = self.data.read().await;

        match data.get(&key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| StoreError::Decode(e.to_string())),
        }
    }

    async fn fetch_step(
        &self,
        project: Uuid,
        step: WizardStep,
    ) -> Result<Option<Value>, StoreError> {
        let key = Self::full_key(MemoryScope::STEP, project, step.as_str());
        Ok(self.data.read().await.get(&key).cloned())
    }

    async fn save_step(
        &self,
        project: Uuid,
        step: WizardStep,
        payload: &Value,
    ) -> Result<(), StoreError> {
        let key = Self::full_key(MemoryScope::STEP, project, step.as_str());
        self.data.write().await.insert(key.clone(), payload.clone());
        self.bump_write_count(&key).await;
        Ok(())
    }

    async fn fetch_asset(
        &self,
        project: Uuid,
        kind: AssetKind,
    ) -> Result<Option<Asset>, StoreError> {
        let key = Self::full_key(MemoryScope::ASSET, project, kind.as_str());
        let data = self.data.read().await;

        match data.get(&key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| StoreError::Decode(e.to_string())),
        }
    }

    async fn save_asset(
        &self,
        project: Uuid,
        kind: AssetKind,
        content: &str,
        metadata: Option<Value>,
    ) -> Result<(), StoreError> {
        let key = Self::full_key(MemoryScope::ASSET, project, kind.as_str());
        let asset = Asset {
            content: content.to_string(),
            metadata,
        };
        let serialized =
            serde_json::to_value(&asset).map_err(|e| StoreError::Decode(e.to_string()))?;

        self.data.write().await.insert(key.clone(), serialized);
        self.bump_write_count(&key).await;
        Ok(())
    }
}
