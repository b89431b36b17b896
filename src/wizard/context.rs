use std::sync::Arc;

use anyhow::Result;

use crate::config::{Config, StoreBackend};
use crate::llm::client::GenerationClient;
use crate::store::{MemoryStore, ProjectStore, RestStore};

/// 向导上下文 - 控制器持有的共享资源
#[derive(Clone)]
pub struct WizardContext {
    /// 配置
    pub config: Config,
    /// 生成客户端，用于与AI通信
    pub generation: GenerationClient,
    /// 项目存储客户端
    pub store: Arc<dyn ProjectStore>,
}

impl WizardContext {
    /// 根据配置创建上下文，按配置选择存储后端
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn ProjectStore> = match config.store.backend {
            StoreBackend::Rest => Arc::new(RestStore::new(&config.store)?),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };

        Self::with_store(config, store)
    }

    /// 使用外部提供的存储后端创建上下文
    pub fn with_store(config: Config, store: Arc<dyn ProjectStore>) -> Result<Self> {
        let generation = GenerationClient::new(config.llm.clone())?;

        Ok(Self {
            config,
            generation,
            store,
        })
    }
}
