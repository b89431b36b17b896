use crate::config::{Config, LLMProvider, StoreBackend};
use clap::Parser;
use std::path::PathBuf;
use uuid::Uuid;

/// Marque (brandwizard-rs) - 由Rust与AI驱动的品牌识别向导引擎
#[derive(Parser, Debug)]
#[command(name = "Marque (brandwizard-rs)")]
#[command(
    about = "Headless brand identity wizard engine. It owns the multi-step brand form flow, detects per-step changes before persisting answers, loads step data and generated assets in parallel, and generates branding content with LLMs."
)]
#[command(version)]
pub struct Args {
    /// 项目ID
    #[arg(short, long)]
    pub project_id: Option<Uuid>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 存储后端 (rest, memory)
    #[arg(long)]
    pub store_backend: Option<String>,

    /// 存储REST接口基地址
    #[arg(long)]
    pub store_base_url: Option<String>,

    /// 存储服务API KEY
    #[arg(long)]
    pub store_api_key: Option<String>,

    /// 挂载加载的最大并发数
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// LLM Provider (gemini, openai, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 文案生成所用模型
    #[arg(long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("marque.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                Config::default()
            }
        };

        // CLI参数优先级最高，逐项覆盖配置文件中的设置
        if let Some(project_id) = self.project_id {
            config.project_id = Some(project_id);
        }

        // 覆盖存储配置
        if let Some(backend_str) = self.store_backend {
            if let Ok(backend) = backend_str.parse::<StoreBackend>() {
                config.store.backend = backend;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的存储后端: {}，使用默认后端",
                    backend_str
                );
            }
        }
        if let Some(store_base_url) = self.store_base_url {
            config.store.base_url = store_base_url;
        }
        if let Some(store_api_key) = self.store_api_key {
            config.store.api_key = store_api_key;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.store.max_parallels = max_parallels;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        if self.verbose {
            config.verbose = true;
        }

        config
    }
}
