//! 挂载加载 - 并行拉取步骤数据与生成资产，失败逐项捕获

use std::collections::HashMap;
use std::pin::Pin;

use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::store::{Asset, AssetKind, StoreError};
use crate::types::assets::GeneratedLogo;
use crate::utils::threads::do_parallel_with_limit;
use crate::wizard::WizardStep;
use crate::wizard::controller::{WizardController, WizardError};

/// 单项加载的出错来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Step(WizardStep),
    Asset(AssetKind),
}

/// 单项加载的错误类别：远程/传输错误或已落库数据无法解析
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Remote,
    Data,
}

/// 单项加载失败记录
///
/// 是否以及如何向用户呈现由调用方决定，核心逻辑不内嵌任何
/// 通知行为。
#[derive(Debug)]
pub struct LoadFailure {
    pub source: LoadSource,
    pub kind: FailureKind,
    pub message: String,
}

impl LoadFailure {
    fn remote(source: LoadSource, error: StoreError) -> Self {
        Self {
            source,
            kind: FailureKind::Remote,
            message: error.to_string(),
        }
    }

    fn data(source: LoadSource, message: String) -> Self {
        Self {
            source,
            kind: FailureKind::Data,
            message,
        }
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subject = match self.source {
            LoadSource::Step(step) => format!("步骤 {}", step),
            LoadSource::Asset(kind) => format!("资产 {}", kind),
        };
        let category = match self.kind {
            FailureKind::Remote => "远程错误",
            FailureKind::Data => "数据错误",
        };
        write!(f, "加载{}失败（{}）: {}", subject, category, self.message)
    }
}

/// 挂载加载结果
#[derive(Debug, Default)]
pub struct LoadReport {
    /// 是否从历史进度恢复（completion为0的新项目为false）
    pub resumed: bool,
    pub loaded_steps: Vec<WizardStep>,
    pub loaded_assets: Vec<AssetKind>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// 某步骤是否有加载失败记录
    pub fn step_failed(&self, step: WizardStep) -> bool {
        self.failures
            .iter()
            .any(|failure| failure.source == LoadSource::Step(step))
    }
}

/// 并行批次中单项的结果
enum LoadOutcome {
    Step(WizardStep, Result<Option<Value>, StoreError>),
    Asset(AssetKind, Result<Option<Asset>, StoreError>),
}

/// `logos`资产的内容结构
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogosCollection {
    #[serde(default)]
    logos: Vec<GeneratedLogo>,
    #[serde(default)]
    selected_logo_id: Option<String>,
}

/// `moodboard`资产的内容结构
#[derive(Debug, Deserialize)]
struct MoodboardContent {
    #[serde(default)]
    images: Vec<String>,
}

impl WizardController {
    /// 挂载加载：读项目记录，并行拉取步骤数据与资产并合并进表单
    ///
    /// 单项失败只产生一条`LoadFailure`，不会中断其余项；合并阶段
    /// 由当前调用方单线程按固定顺序执行，结果确定。
    pub async fn load(&mut self) -> Result<LoadReport, WizardError> {
        let project = self
            .context
            .store
            .fetch_project(self.project_id)
            .await
            .map_err(WizardError::LoadFailed)?
            .ok_or(WizardError::ProjectNotFound(self.project_id))?;

        self.form.industry = project.industry.clone();
        self.form.business_name = project.name.clone();

        let mut report = LoadReport::default();

        // 全新项目：定位到第一步，不发起任何步骤/资产读取
        if project.completion_percentage == 0 {
            self.current = WizardStep::Basics;
            return Ok(report);
        }
        report.resumed = true;

        let mut batch: Vec<Pin<Box<dyn Future<Output = LoadOutcome> + Send>>> = Vec::new();

        for step in WizardStep::STORED {
            let store = self.context.store.clone();
            let project_id = self.project_id;
            batch.push(Box::pin(async move {
                LoadOutcome::Step(step, store.fetch_step(project_id, step).await)
            }));
        }

        for kind in AssetKind::ALL {
            let store = self.context.store.clone();
            let project_id = self.project_id;
            batch.push(Box::pin(async move {
                LoadOutcome::Asset(kind, store.fetch_asset(project_id, kind).await)
            }));
        }

        let max_parallels = self.context.config.store.max_parallels;
        let outcomes = do_parallel_with_limit(batch, max_parallels).await;

        // 按完成顺序收集，再按固定顺序合并，保证结果确定
        let mut step_payloads: HashMap<WizardStep, Value> = HashMap::new();
        let mut assets: HashMap<AssetKind, Asset> = HashMap::new();

        for outcome in outcomes {
            match outcome {
                LoadOutcome::Step(step, Ok(Some(payload))) => {
                    step_payloads.insert(step, payload);
                }
                LoadOutcome::Step(_, Ok(None)) => {}
                LoadOutcome::Step(step, Err(error)) => {
                    report
                        .failures
                        .push(LoadFailure::remote(LoadSource::Step(step), error));
                }
                LoadOutcome::Asset(kind, Ok(Some(asset))) => {
                    assets.insert(kind, asset);
                }
                LoadOutcome::Asset(_, Ok(None)) => {}
                LoadOutcome::Asset(kind, Err(error)) => {
                    report
                        .failures
                        .push(LoadFailure::remote(LoadSource::Asset(kind), error));
                }
            }
        }

        for step in WizardStep::STORED {
            if let Some(payload) = step_payloads.remove(&step) {
                self.apply_step_payload(step, payload, &mut report);
            }
        }

        for kind in AssetKind::ALL {
            if let Some(asset) = assets.remove(&kind) {
                self.apply_asset(kind, asset, &mut report);
            }
        }

        Ok(report)
    }

    /// 把某步骤的历史载荷合并进表单，并以其初始化步骤缓存
    fn apply_step_payload(&mut self, step: WizardStep, payload: Value, report: &mut LoadReport) {
        let Some(fields) = payload.as_object() else {
            return;
        };
        if fields.is_empty() {
            return;
        }

        let merge_result = if step == WizardStep::Logo {
            // Logo步骤只取其logo字段，避免历史杂项覆盖表单
            match fields.get("logo") {
                Some(logo) if !logo.is_null() => {
                    self.merge_form(&json!({ "logo": logo.clone() }))
                }
                _ => Ok(()),
            }
        } else {
            self.merge_form(&payload)
        };

        if let Err(error) = merge_result {
            report.failures.push(LoadFailure::data(
                LoadSource::Step(step),
                format!("步骤载荷无法并入表单: {}", error),
            ));
            return;
        }

        self.cache.seed(step, &payload);
        self.validity.insert(step, true);
        report.loaded_steps.push(step);
    }

    /// 把一条生成资产写回表单的ai_generated区
    fn apply_asset(&mut self, kind: AssetKind, asset: Asset, report: &mut LoadReport) {
        let content = asset.content.clone();

        match kind {
            AssetKind::BrandName => {
                self.form.ai_generated.brand_name = content;
                self.validity.insert(WizardStep::BrandName, true);
            }
            AssetKind::MissionStatement => self.form.ai_generated.mission = content,
            AssetKind::VisionStatement => self.form.ai_generated.vision = content,
            AssetKind::ValueProposition => self.form.ai_generated.value_proposition = content,
            AssetKind::BrandEssence => self.form.ai_generated.brand_essence = content,
            AssetKind::BrandVoice => self.form.ai_generated.brand_voice = content,
            AssetKind::ColorPalette => match serde_json::from_str(&content) {
                Ok(palette) => {
                    self.form.ai_generated.color_palette = Some(palette);
                    self.validity.insert(WizardStep::Aesthetics, true);
                }
                Err(error) => {
                    report.failures.push(LoadFailure::data(
                        LoadSource::Asset(kind),
                        format!("色板内容解析失败: {}", error),
                    ));
                    return;
                }
            },
            AssetKind::Logo => {
                if !asset_belongs_to_project(&asset, self.project_id) {
                    return;
                }
                // logos集合已加载时，单个logo资产不再生效
                if !self.generated_logos.is_empty() {
                    return;
                }
                match serde_json::from_str::<GeneratedLogo>(&content) {
                    Ok(logo) => {
                        self.form.logo = Some(logo.clone());
                        self.form.ai_generated.logo = Some(logo.clone());
                        self.generated_logos = vec![logo];
                        self.validity.insert(WizardStep::Logo, true);
                    }
                    Err(error) => {
                        report.failures.push(LoadFailure::data(
                            LoadSource::Asset(kind),
                            format!("Logo内容解析失败: {}", error),
                        ));
                        return;
                    }
                }
            }
            AssetKind::Logos => {
                if !asset_belongs_to_project(&asset, self.project_id) {
                    return;
                }
                match serde_json::from_str::<LogosCollection>(&content) {
                    Ok(collection) if !collection.logos.is_empty() => {
                        let mut unique: Vec<GeneratedLogo> = Vec::new();
                        for logo in collection.logos {
                            if !unique.iter().any(|seen| seen.id == logo.id) {
                                unique.push(logo);
                            }
                        }

                        let selected = collection
                            .selected_logo_id
                            .as_ref()
                            .and_then(|id| unique.iter().find(|logo| logo.id == *id))
                            .or_else(|| unique.first())
                            .cloned();

                        self.generated_logos = unique;
                        if let Some(logo) = selected {
                            self.form.logo = Some(logo.clone());
                            self.form.ai_generated.logo = Some(logo);
                            self.validity.insert(WizardStep::Logo, true);
                        }
                    }
                    Ok(_) => return,
                    Err(error) => {
                        report.failures.push(LoadFailure::data(
                            LoadSource::Asset(kind),
                            format!("Logo集合内容解析失败: {}", error),
                        ));
                        return;
                    }
                }
            }
            AssetKind::Moodboard => {
                if !asset_belongs_to_project(&asset, self.project_id) {
                    return;
                }
                match serde_json::from_str::<MoodboardContent>(&content) {
                    Ok(moodboard) if !moodboard.images.is_empty() => {
                        self.form.moodboard_urls = moodboard.images;
                        self.validity.insert(WizardStep::Aesthetics, true);
                    }
                    Ok(_) => return,
                    Err(error) => {
                        report.failures.push(LoadFailure::data(
                            LoadSource::Asset(kind),
                            format!("灵感板内容解析失败: {}", error),
                        ));
                        return;
                    }
                }
            }
        }

        report.loaded_assets.push(kind);
    }
}

/// 资产是否属于当前项目：metadata缺失视为本项目历史数据
fn asset_belongs_to_project(asset: &Asset, project: Uuid) -> bool {
    match asset.metadata_project_id() {
        Some(id) => id == project.to_string(),
        None => true,
    }
}
