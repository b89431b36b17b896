//! 品牌向导 - 多步骤表单流程的状态机与编排

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod context;
pub mod controller;
pub mod loader;

pub use context::WizardContext;
pub use controller::{WizardController, WizardError};
pub use loader::{FailureKind, LoadFailure, LoadReport, LoadSource};

/// 向导步骤，按固定顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    #[serde(rename = "basics")]
    Basics,
    #[serde(rename = "brand_name")]
    BrandName,
    #[serde(rename = "audience")]
    Audience,
    #[serde(rename = "personality")]
    Personality,
    #[serde(rename = "story")]
    Story,
    #[serde(rename = "competition")]
    Competition,
    #[serde(rename = "aesthetics")]
    Aesthetics,
    #[serde(rename = "logo")]
    Logo,
    #[serde(rename = "results")]
    Results,
}

impl WizardStep {
    /// 完整步骤序列
    pub const SEQUENCE: [WizardStep; 9] = [
        WizardStep::Basics,
        WizardStep::BrandName,
        WizardStep::Audience,
        WizardStep::Personality,
        WizardStep::Story,
        WizardStep::Competition,
        WizardStep::Aesthetics,
        WizardStep::Logo,
        WizardStep::Results,
    ];

    /// 以步骤数据形式持久化的步骤
    ///
    /// BrandName的内容作为资产持久化，不在其列；Results不保存
    /// 但历史实现会尝试读取，保持一致。
    pub const STORED: [WizardStep; 8] = [
        WizardStep::Basics,
        WizardStep::Audience,
        WizardStep::Personality,
        WizardStep::Story,
        WizardStep::Competition,
        WizardStep::Aesthetics,
        WizardStep::Logo,
        WizardStep::Results,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Basics => "basics",
            WizardStep::BrandName => "brand_name",
            WizardStep::Audience => "audience",
            WizardStep::Personality => "personality",
            WizardStep::Story => "story",
            WizardStep::Competition => "competition",
            WizardStep::Aesthetics => "aesthetics",
            WizardStep::Logo => "logo",
            WizardStep::Results => "results",
        }
    }

    /// 该步骤在序列中的位置
    pub fn position(&self) -> usize {
        Self::SEQUENCE
            .iter()
            .position(|step| step == self)
            .expect("步骤必在序列中")
    }

    /// 序列中的下一个步骤，终点返回None
    pub fn following(&self) -> Option<WizardStep> {
        Self::SEQUENCE.get(self.position() + 1).copied()
    }

    /// 序列中的上一个步骤，起点返回None
    pub fn preceding(&self) -> Option<WizardStep> {
        let position = self.position();
        if position == 0 {
            None
        } else {
            Self::SEQUENCE.get(position - 1).copied()
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basics" => Ok(WizardStep::Basics),
            "brand_name" => Ok(WizardStep::BrandName),
            "audience" => Ok(WizardStep::Audience),
            "personality" => Ok(WizardStep::Personality),
            "story" => Ok(WizardStep::Story),
            "competition" => Ok(WizardStep::Competition),
            "aesthetics" => Ok(WizardStep::Aesthetics),
            "logo" => Ok(WizardStep::Logo),
            "results" => Ok(WizardStep::Results),
            _ => Err(format!("Unknown wizard step: {}", s)),
        }
    }
}

/// 启动品牌向导工作流
pub async fn launch(config: &crate::config::Config) -> Result<()> {
    let project_id = config
        .project_id
        .ok_or_else(|| anyhow::anyhow!("未指定项目ID，请通过 --project-id 或配置文件传入"))?;

    let context = WizardContext::new(config.clone())?;

    if !context.generation.has_credential() {
        println!("⚠️ 未配置生成服务凭证，AI生成功能不可用（可通过 MARQUE_LLM_API_KEY 配置）");
    }

    println!("🚀 正在加载项目 {} 的向导数据...", project_id);
    let mut wizard = WizardController::new(context, project_id);
    let report = wizard.load().await?;

    if report.resumed {
        println!(
            "✅ 已恢复历史进度：加载步骤数据 {} 项、生成资产 {} 项",
            report.loaded_steps.len(),
            report.loaded_assets.len()
        );
    } else {
        println!("✅ 新项目，从第一步开始");
    }

    for failure in &report.failures {
        eprintln!("⚠️ {}", failure);
    }

    println!("\n步骤就绪情况：");
    for step in WizardStep::SEQUENCE {
        let marker = if wizard.step_ready(step) { "✅" } else { "◻️" };
        println!("  {} {}", marker, step);
    }

    Ok(())
}

// Include tests
#[cfg(test)]
mod tests;
