//! 生成客户端 - 提供品牌文案与色板的AI生成接口

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::LLMConfig;
use crate::types::assets::GeneratedColorPalette;

mod prompts;
mod providers;

use providers::ProviderClient;

/// 文案生成类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationKind {
    #[serde(rename = "brand_name")]
    BrandName,
    #[serde(rename = "mission")]
    Mission,
    #[serde(rename = "vision")]
    Vision,
    #[serde(rename = "values")]
    Values,
    #[serde(rename = "origin_story")]
    OriginStory,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::BrandName => "brand_name",
            GenerationKind::Mission => "mission",
            GenerationKind::Vision => "vision",
            GenerationKind::Values => "values",
            GenerationKind::OriginStory => "origin_story",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GenerationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand_name" => Ok(GenerationKind::BrandName),
            "mission" => Ok(GenerationKind::Mission),
            "vision" => Ok(GenerationKind::Vision),
            "values" => Ok(GenerationKind::Values),
            "origin_story" => Ok(GenerationKind::OriginStory),
            _ => Err(format!("Unknown generation kind: {}", s)),
        }
    }
}

/// 生成调用的结构化输入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInputs {
    pub industry: String,
    pub name: String,
    pub product_service: String,
}

/// 生成调用错误
///
/// MissingCredential属于配置错误，在发起任何网络调用前同步返回；
/// Remote覆盖传输失败与远端上报的失败。错误一律以值返回，
/// 不跨越调用边界抛出。
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("缺少生成服务凭证，请先配置API KEY")]
    MissingCredential,
    #[error("生成服务调用失败: {0}")]
    Remote(String),
}

/// 生成客户端
///
/// 调用期间维护in-flight标记，失败时记录可读的错误消息，
/// 供上层界面展示；两者均可在调用结束后查询。
#[derive(Clone)]
pub struct GenerationClient {
    config: LLMConfig,
    client: Option<ProviderClient>,
    in_flight: Arc<AtomicBool>,
    last_error: Arc<std::sync::Mutex<Option<String>>>,
}

impl GenerationClient {
    /// 创建生成客户端，不发起网络请求
    ///
    /// 凭证缺失时客户端仍可创建，但所有生成调用都会同步失败。
    pub fn new(config: LLMConfig) -> anyhow::Result<Self> {
        let client = if config.api_key.trim().is_empty() {
            None
        } else {
            Some(ProviderClient::new(&config)?)
        };

        Ok(Self {
            config,
            client,
            in_flight: Arc::new(AtomicBool::new(false)),
            last_error: Arc::new(std::sync::Mutex::new(None)),
        })
    }

    /// 是否已配置生成凭证
    pub fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    /// 是否有调用正在进行
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// 最近一次失败的可读消息，成功调用开始时清空
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().map(|e| e.clone()).unwrap_or(None)
    }

    /// 生成指定类型的品牌文案
    pub async fn generate(
        &self,
        kind: GenerationKind,
        inputs: &GenerationInputs,
    ) -> Result<String, GenerationError> {
        self.begin();
        let result = self.generate_inner(kind, inputs).await;
        self.finish(&result);
        result
    }

    /// 生成结构化的品牌色板
    pub async fn generate_palette(
        &self,
        inputs: &GenerationInputs,
    ) -> Result<GeneratedColorPalette, GenerationError> {
        self.begin();
        let result = self.generate_palette_inner(inputs).await;
        self.finish(&result);
        result
    }

    async fn generate_inner(
        &self,
        kind: GenerationKind,
        inputs: &GenerationInputs,
    ) -> Result<String, GenerationError> {
        let client = self
            .client
            .as_ref()
            .ok_or(GenerationError::MissingCredential)?;

        let agent = client.create_agent(
            &self.config.model,
            prompts::system_prompt(kind),
            &self.config,
        );
        let user_prompt = prompts::user_prompt(inputs);
        let timeout = std::time::Duration::from_secs(self.config.timeout_seconds);

        let content = self
            .retry_with_backoff(|| async {
                match tokio::time::timeout(timeout, agent.prompt(&user_prompt)).await {
                    Ok(result) => result,
                    Err(_) => Err(anyhow::anyhow!("生成请求超时（{}秒）", timeout.as_secs())),
                }
            })
            .await
            .map_err(|e| GenerationError::Remote(e.to_string()))?;

        Ok(content.trim().to_string())
    }

    async fn generate_palette_inner(
        &self,
        inputs: &GenerationInputs,
    ) -> Result<GeneratedColorPalette, GenerationError> {
        let client = self
            .client
            .as_ref()
            .ok_or(GenerationError::MissingCredential)?;

        let extractor = client.create_extractor::<GeneratedColorPalette>(
            &self.config.model,
            prompts::PALETTE_SYSTEM_PROMPT,
            &self.config,
        );
        let user_prompt = prompts::user_prompt(inputs);
        let timeout = std::time::Duration::from_secs(self.config.timeout_seconds);

        let palette = self
            .retry_with_backoff(|| async {
                match tokio::time::timeout(timeout, extractor.extract(&user_prompt)).await {
                    Ok(result) => result,
                    Err(_) => Err(anyhow::anyhow!("生成请求超时（{}秒）", timeout.as_secs())),
                }
            })
            .await
            .map_err(|e| GenerationError::Remote(e.to_string()))?;

        if !palette.all_colors_valid() {
            return Err(GenerationError::Remote(format!(
                "生成的色板包含非法颜色值: {:?}",
                palette
                    .colors
                    .iter()
                    .map(|c| c.hex.as_str())
                    .collect::<Vec<_>>()
            )));
        }

        Ok(palette)
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> anyhow::Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let max_retries = self.config.retry_attempts;
        let retry_delay_ms = self.config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    eprintln!(
                        "❌ 调用生成服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    fn begin(&self) {
        self.in_flight.store(true, Ordering::SeqCst);
        if let Ok(mut last_error) = self.last_error.lock() {
            *last_error = None;
        }
    }

    fn finish<T>(&self, result: &Result<T, GenerationError>) {
        if let Err(err) = result
            && let Ok(mut last_error) = self.last_error.lock()
        {
            *last_error = Some(err.to_string());
        }
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

// Include tests
#[cfg(test)]
mod tests;
