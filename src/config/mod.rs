use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use uuid::Uuid;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(LLMProvider::Gemini),
            "openai" => Ok(LLMProvider::OpenAI),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 存储后端类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum StoreBackend {
    /// BaaS暴露的REST接口
    #[serde(rename = "rest")]
    #[default]
    Rest,
    /// 进程内内存存储（离线/测试）
    #[serde(rename = "memory")]
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Rest => write!(f, "rest"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(StoreBackend::Rest),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// 当前打开的项目ID
    pub project_id: Option<Uuid>,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 存储配置
    pub store: StoreConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY（生成凭证，缺失时生成功能同步失败且不发起网络调用）
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 文案生成所用模型
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 单次调用超时时间（秒）
    pub timeout_seconds: u64,
}

/// 存储配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    /// 存储后端类型
    pub backend: StoreBackend,

    /// REST接口基地址
    pub base_url: String,

    /// 存储服务API KEY
    pub api_key: String,

    /// 请求超时时间（秒）
    pub timeout_seconds: u64,

    /// 挂载加载的最大并发数
    pub max_parallels: usize,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: None,
            llm: LLMConfig::default(),
            store: StoreConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("MARQUE_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://generativelanguage.googleapis.com/v1beta"),
            model: String::from("gemini-2.0-flash"),
            max_tokens: 8192,
            temperature: 0.7,
            retry_attempts: 3,
            retry_delay_ms: 2000,
            timeout_seconds: 60,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            base_url: String::from("http://localhost:54321/rest/v1"),
            api_key: std::env::var("MARQUE_STORE_API_KEY").unwrap_or_default(),
            timeout_seconds: 30,
            max_parallels: 6,
        }
    }
}
