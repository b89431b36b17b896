//! REST存储后端 - 对接BaaS暴露的PostgREST风格接口

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::store::{Asset, AssetKind, Project, ProjectStore, StoreError};
use crate::wizard::WizardStep;

/// 步骤数据行
#[derive(Debug, Deserialize)]
struct StepRow {
    payload: Value,
}

/// 步骤数据upsert载荷
#[derive(Debug, Serialize)]
struct StepUpsert<'a> {
    project_id: Uuid,
    step: &'a str,
    payload: &'a Value,
}

/// 资产upsert载荷
#[derive(Debug, Serialize)]
struct AssetUpsert<'a> {
    project_id: Uuid,
    asset_type: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
    created_at: String,
}

/// REST存储客户端
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// 根据存储配置构造客户端，不发起任何网络请求
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client for the project store")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// 发送GET并把响应体解析为行集合
    async fn fetch_rows<T>(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<T>, StoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .authorize(self.client.get(url).query(query))
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Remote(format!("{}: {}", status, body)));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// 发送upsert写入（整体覆盖语义）
    async fn upsert<T>(&self, url: &str, row: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let response = self
            .authorize(self.client.post(url))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row])
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Remote(format!("{}: {}", status, body)));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ProjectStore for RestStore {
    async fn fetch_project(&self, project: Uuid) -> Result<Option<Project>, StoreError> {
        let rows: Vec<Project> = self
            .fetch_rows(
                &self.endpoint("projects"),
                &[
                    ("id", format!("eq.{}", project)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn fetch_step(
        &self,
        project: Uuid,
        step: WizardStep,
    ) -> Result<Option<Value>, StoreError> {
        let rows: Vec<StepRow> = self
            .fetch_rows(
                &self.endpoint("project_steps"),
                &[
                    ("project_id", format!("eq.{}", project)),
                    ("step", format!("eq.{}", step.as_str())),
                    ("select", "payload".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(rows.into_iter().next().map(|row| row.payload))
    }

    async fn save_step(
        &self,
        project: Uuid,
        step: WizardStep,
        payload: &Value,
    ) -> Result<(), StoreError> {
        let row = StepUpsert {
            project_id: project,
            step: step.as_str(),
            payload,
        };
        self.upsert(&self.endpoint("project_steps"), &row).await
    }

    async fn fetch_asset(
        &self,
        project: Uuid,
        kind: AssetKind,
    ) -> Result<Option<Asset>, StoreError> {
        // 取该类型最新一条；历史数据未严格按项目隔离，
        // 跨项目的陈旧行由调用方依据metadata过滤
        let rows: Vec<Asset> = self
            .fetch_rows(
                &self.endpoint("generated_assets"),
                &[
                    ("project_id", format!("eq.{}", project)),
                    ("asset_type", format!("eq.{}", kind.as_str())),
                    ("select", "content,metadata".to_string()),
                    ("order", "created_at.desc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn save_asset(
        &self,
        project: Uuid,
        kind: AssetKind,
        content: &str,
        metadata: Option<Value>,
    ) -> Result<(), StoreError> {
        let row = AssetUpsert {
            project_id: project,
            asset_type: kind.as_str(),
            content,
            metadata,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.upsert(&self.endpoint("generated_assets"), &row).await
    }
}
