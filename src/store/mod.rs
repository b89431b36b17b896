//! 项目存储 - 步骤数据与生成资产的后端读写客户端

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::wizard::WizardStep;

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// 存储层错误分类
///
/// Remote：网络传输失败或后端返回失败；
/// Decode：远端返回的内容无法解析（数据错误）。
/// 配置类错误在构造客户端时即被拦截，不会出现在这里。
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("远程请求失败: {0}")]
    Remote(String),
    #[error("响应数据解析失败: {0}")]
    Decode(String),
}

/// 生成资产类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    #[serde(rename = "brand_name")]
    BrandName,
    #[serde(rename = "mission_statement")]
    MissionStatement,
    #[serde(rename = "vision_statement")]
    VisionStatement,
    #[serde(rename = "value_proposition")]
    ValueProposition,
    #[serde(rename = "brand_essence")]
    BrandEssence,
    #[serde(rename = "brand_voice")]
    BrandVoice,
    #[serde(rename = "color_palette")]
    ColorPalette,
    #[serde(rename = "logo")]
    Logo,
    /// 全部候选Logo的集合（含选中项id）
    #[serde(rename = "logos")]
    Logos,
    #[serde(rename = "moodboard")]
    Moodboard,
}

impl AssetKind {
    /// 全部资产类型，挂载加载时逐一拉取
    pub const ALL: [AssetKind; 10] = [
        AssetKind::BrandName,
        AssetKind::MissionStatement,
        AssetKind::VisionStatement,
        AssetKind::ValueProposition,
        AssetKind::BrandEssence,
        AssetKind::BrandVoice,
        AssetKind::ColorPalette,
        AssetKind::Logo,
        AssetKind::Logos,
        AssetKind::Moodboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::BrandName => "brand_name",
            AssetKind::MissionStatement => "mission_statement",
            AssetKind::VisionStatement => "vision_statement",
            AssetKind::ValueProposition => "value_proposition",
            AssetKind::BrandEssence => "brand_essence",
            AssetKind::BrandVoice => "brand_voice",
            AssetKind::ColorPalette => "color_palette",
            AssetKind::Logo => "logo",
            AssetKind::Logos => "logos",
            AssetKind::Moodboard => "moodboard",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand_name" => Ok(AssetKind::BrandName),
            "mission_statement" => Ok(AssetKind::MissionStatement),
            "vision_statement" => Ok(AssetKind::VisionStatement),
            "value_proposition" => Ok(AssetKind::ValueProposition),
            "brand_essence" => Ok(AssetKind::BrandEssence),
            "brand_voice" => Ok(AssetKind::BrandVoice),
            "color_palette" => Ok(AssetKind::ColorPalette),
            "logo" => Ok(AssetKind::Logo),
            "logos" => Ok(AssetKind::Logos),
            "moodboard" => Ok(AssetKind::Moodboard),
            _ => Err(format!("Unknown asset kind: {}", s)),
        }
    }
}

/// 项目记录（由外部服务拥有，此处只读）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub completion_percentage: u8,
}

/// 生成资产记录
///
/// content是不透明字符串（纯文本或序列化后的结构数据）；
/// metadata对存储层同样不透明，仅供调用方做下游过滤：
/// 资产读取时并非严格按项目隔离，跨项目的陈旧数据须由
/// 调用方依据metadata识别并丢弃。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Asset {
    /// 从metadata中取出资产所属的项目id（若有）
    pub fn metadata_project_id(&self) -> Option<String> {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.get("projectId"))
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
    }
}

/// 项目存储客户端接口
///
/// 步骤数据按 (projectId, stepId) 定位，资产按 (projectId, assetType)
/// 定位，二者写入均为整体覆盖语义。
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// 获取项目记录，不存在返回None
    async fn fetch_project(&self, project: Uuid) -> Result<Option<Project>, StoreError>;

    /// 获取某步骤最近保存的载荷，从未保存返回None
    async fn fetch_step(
        &self,
        project: Uuid,
        step: WizardStep,
    ) -> Result<Option<Value>, StoreError>;

    /// 保存某步骤的载荷，覆盖旧值
    async fn save_step(
        &self,
        project: Uuid,
        step: WizardStep,
        payload: &Value,
    ) -> Result<(), StoreError>;

    /// 获取某类型最近保存的资产，不存在返回None
    async fn fetch_asset(
        &self,
        project: Uuid,
        kind: AssetKind,
    ) -> Result<Option<Asset>, StoreError>;

    /// 保存某类型的资产，覆盖同类型旧值
    async fn save_asset(
        &self,
        project: Uuid,
        kind: AssetKind,
        content: &str,
        metadata: Option<Value>,
    ) -> Result<(), StoreError>;
}

// Include tests
#[cfg(test)]
mod tests;
