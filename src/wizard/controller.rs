use std::collections::HashMap;

use serde_json::{Value, json};
use uuid::Uuid;

use crate::cache::StepCache;
use crate::normalize::normalize;
use crate::store::{AssetKind, StoreError};
use crate::types::assets::{GeneratedColorPalette, GeneratedLogo};
use crate::types::form::FormData;
use crate::wizard::{WizardContext, WizardStep};

/// 向导流程错误
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("项目 {0} 不存在")]
    ProjectNotFound(Uuid),
    #[error("加载项目记录失败: {0}")]
    LoadFailed(StoreError),
    #[error("步骤 {step} 保存失败: {source}")]
    SaveFailed {
        step: WizardStep,
        source: StoreError,
    },
    #[error("资产 {kind} 保存失败: {source}")]
    AssetSaveFailed {
        kind: AssetKind,
        source: StoreError,
    },
    #[error("资产类型 {0} 不是文本资产")]
    NotTextAsset(AssetKind),
    #[error("表单更新载荷必须是JSON对象")]
    PatchRejected,
    #[error("表单数据编码失败: {0}")]
    Encode(#[from] serde_json::Error),
}

/// 向导控制器 - 多步骤表单的状态机
///
/// 表单状态、步骤缓存、有效性映射都只被持有控制器的单一调用方
/// 修改；所有会写存储的操作都要求`&mut self`，因此同一步骤不可能
/// 有两个保存同时在途，每步骤的写入天然串行化。
pub struct WizardController {
    pub(crate) context: WizardContext,
    pub(crate) project_id: Uuid,
    pub(crate) current: WizardStep,
    pub(crate) form: FormData,
    pub(crate) validity: HashMap<WizardStep, bool>,
    pub(crate) cache: StepCache,
    pub(crate) generated_logos: Vec<GeneratedLogo>,
    pub(crate) is_saving: bool,
}

impl WizardController {
    /// 创建控制器，表单为固定默认值，当前步骤为第一步
    pub fn new(context: WizardContext, project_id: Uuid) -> Self {
        Self {
            context,
            project_id,
            current: WizardStep::Basics,
            form: FormData::default(),
            validity: HashMap::new(),
            cache: StepCache::new(),
            generated_logos: Vec::new(),
            is_saving: false,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.current
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormData {
        &mut self.form
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn generated_logos(&self) -> &[GeneratedLogo] {
        &self.generated_logos
    }

    pub fn step_cache(&self) -> &StepCache {
        &self.cache
    }

    /// 步骤有效性映射，仅用于前向导航的门控展示
    pub fn validity(&self) -> &HashMap<WizardStep, bool> {
        &self.validity
    }

    /// 当前步骤是否允许前进
    pub fn can_proceed(&self) -> bool {
        self.step_ready(self.current)
    }

    /// 指定步骤的前进资格 - 当前表单字段的纯函数
    pub fn step_ready(&self, step: WizardStep) -> bool {
        let form = &self.form;
        match step {
            WizardStep::Basics => {
                !form.industry.is_empty()
                    && !form.business_name.is_empty()
                    && !form.product_service.is_empty()
            }
            WizardStep::BrandName => !form.brand_name.is_empty(),
            WizardStep::Audience => {
                form.demographics.any_filled() && form.psychographics.any_filled()
            }
            WizardStep::Personality => !form.selected_archetype.is_empty(),
            WizardStep::Story => {
                !form.mission.is_empty() && !form.vision.is_empty() && !form.values.is_empty()
            }
            WizardStep::Competition => {
                !form.competitors.is_empty() && !form.differentiators.is_empty()
            }
            WizardStep::Aesthetics => !form.visual_style.is_empty(),
            WizardStep::Logo => form.logo.is_some() || form.ai_generated.logo.is_some(),
            WizardStep::Results => true,
        }
    }

    /// 前进一步
    ///
    /// Results步骤不做持久化直接推进；其余步骤先解析待保存载荷并
    /// 做变更检测，无变更立即推进，有变更则保存成功后才推进；
    /// 保存失败返回错误且状态不变，用户下次操作即是幂等重试。
    pub async fn next(&mut self) -> Result<WizardStep, WizardError> {
        let step = self.current;

        if step == WizardStep::Results {
            self.advance();
            return Ok(self.current);
        }

        let payload = self.resolve_step_payload(step)?;
        self.persist_step_if_changed(step, payload).await?;
        self.advance();
        Ok(self.current)
    }

    /// 无条件后退一步（已在起点则停留）
    pub fn previous(&mut self) -> WizardStep {
        if let Some(step) = self.current.preceding() {
            self.current = step;
        }
        self.current
    }

    /// 合并某步骤的部分表单更新
    ///
    /// patch在顶层键上浅合并进表单。force_save时走与`next`相同的
    /// 变更检测与保存路径但不推进步骤（美学偏好等需要即时落库的
    /// 场景）。
    pub async fn update_step(
        &mut self,
        step: WizardStep,
        patch: Value,
        force_save: bool,
    ) -> Result<(), WizardError> {
        if step == WizardStep::Logo {
            let has_logo = patch.get("logo").map(|v| !v.is_null()).unwrap_or(false)
                || patch
                    .pointer("/aiGenerated/logo")
                    .map(|v| !v.is_null())
                    .unwrap_or(false);
            if has_logo {
                self.validity.insert(WizardStep::Logo, true);
            }
        }

        self.merge_form(&patch)?;
        self.validity.insert(step, true);

        if force_save {
            let payload = self.resolve_step_payload(step)?;
            self.persist_step_if_changed(step, payload).await?;
        }

        Ok(())
    }

    /// 采纳一段AI生成的品牌文案：持久化为资产并写入表单
    pub async fn select_generated_text(
        &mut self,
        kind: AssetKind,
        text: &str,
    ) -> Result<(), WizardError> {
        if !matches!(
            kind,
            AssetKind::BrandName
                | AssetKind::MissionStatement
                | AssetKind::VisionStatement
                | AssetKind::ValueProposition
                | AssetKind::BrandEssence
                | AssetKind::BrandVoice
        ) {
            return Err(WizardError::NotTextAsset(kind));
        }

        self.context
            .store
            .save_asset(self.project_id, kind, text, None)
            .await
            .map_err(|source| WizardError::AssetSaveFailed { kind, source })?;

        let ai = &mut self.form.ai_generated;
        match kind {
            AssetKind::BrandName => {
                ai.brand_name = text.to_string();
                self.validity.insert(WizardStep::BrandName, true);
            }
            AssetKind::MissionStatement => ai.mission = text.to_string(),
            AssetKind::VisionStatement => ai.vision = text.to_string(),
            AssetKind::ValueProposition => ai.value_proposition = text.to_string(),
            AssetKind::BrandEssence => ai.brand_essence = text.to_string(),
            AssetKind::BrandVoice => ai.brand_voice = text.to_string(),
            _ => {}
        }

        Ok(())
    }

    /// 采纳AI生成的色板：JSON编码后持久化并写入表单
    pub async fn select_color_palette(
        &mut self,
        palette: GeneratedColorPalette,
    ) -> Result<(), WizardError> {
        let content = serde_json::to_string(&palette)?;
        self.context
            .store
            .save_asset(self.project_id, AssetKind::ColorPalette, &content, None)
            .await
            .map_err(|source| WizardError::AssetSaveFailed {
                kind: AssetKind::ColorPalette,
                source,
            })?;

        self.form.ai_generated.color_palette = Some(palette);
        self.validity.insert(WizardStep::Aesthetics, true);
        Ok(())
    }

    /// 选定Logo：带项目归属metadata持久化，并同时写入主表单与
    /// ai_generated（下游过滤依赖projectId metadata识别跨项目数据）
    pub async fn select_logo(&mut self, logo: GeneratedLogo) -> Result<(), WizardError> {
        let content = serde_json::to_string(&logo)?;
        let metadata = json!({
            "projectId": self.project_id.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        self.context
            .store
            .save_asset(self.project_id, AssetKind::Logo, &content, Some(metadata))
            .await
            .map_err(|source| WizardError::AssetSaveFailed {
                kind: AssetKind::Logo,
                source,
            })?;

        self.form.logo = Some(logo.clone());
        self.form.ai_generated.logo = Some(logo);
        self.validity.insert(WizardStep::Logo, true);
        Ok(())
    }

    /// 解析某步骤待持久化的载荷
    ///
    /// Logo步骤只保存选中的Logo对象（主表单优先，回落到
    /// ai_generated），其余步骤保存去掉aiGenerated子记录的整个
    /// 表单聚合。
    pub(crate) fn resolve_step_payload(&self, step: WizardStep) -> Result<Value, WizardError> {
        if step == WizardStep::Logo {
            let selected = self
                .form
                .logo
                .clone()
                .or_else(|| self.form.ai_generated.logo.clone());
            let logo_value = match selected {
                Some(logo) => serde_json::to_value(logo)?,
                None => Value::Null,
            };
            return Ok(json!({ "logo": logo_value }));
        }

        let mut value = serde_json::to_value(&self.form)?;
        if let Value::Object(fields) = &mut value {
            fields.remove("aiGenerated");
        }
        Ok(value)
    }

    /// 变更检测 + 条件保存，返回是否发生了实际写入
    ///
    /// 保存成功才更新缓存条目；失败时缓存与当前步骤均保持原状。
    pub(crate) async fn persist_step_if_changed(
        &mut self,
        step: WizardStep,
        payload: Value,
    ) -> Result<bool, WizardError> {
        if !self.cache.should_save(step, &payload) {
            if self.context.config.verbose {
                println!("⏭️ 步骤 {} 数据未变化，跳过保存", step);
            }
            return Ok(false);
        }

        if self.context.config.verbose
            && let Some(cached) = self.cache.entry(step)
        {
            log_first_difference(step, cached, &payload);
        }

        self.is_saving = true;
        let result = self
            .context
            .store
            .save_step(self.project_id, step, &payload)
            .await;
        self.is_saving = false;

        match result {
            Ok(()) => {
                self.cache.record(step, &payload);
                Ok(true)
            }
            Err(source) => Err(WizardError::SaveFailed { step, source }),
        }
    }

    /// patch的顶层键浅合并进表单
    pub(crate) fn merge_form(&mut self, patch: &Value) -> Result<(), WizardError> {
        let Value::Object(patch_fields) = patch else {
            return Err(WizardError::PatchRejected);
        };

        let mut form_value = serde_json::to_value(&self.form)?;
        if let Value::Object(fields) = &mut form_value {
            for (key, value) in patch_fields {
                fields.insert(key.clone(), value.clone());
            }
        }

        self.form = serde_json::from_value(form_value)?;
        Ok(())
    }

    fn advance(&mut self) {
        if let Some(step) = self.current.following() {
            self.current = step;
        }
    }
}

/// 详细日志：打印新旧规范化载荷首个差异的位置
fn log_first_difference(step: WizardStep, cached: &Value, candidate: &Value) {
    let old_text = cached.to_string();
    let new_text = normalize(candidate).to_string();

    let position = old_text
        .bytes()
        .zip(new_text.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| old_text.len().min(new_text.len()));

    println!(
        "📝 步骤 {} 检测到变更，首个差异位于第 {} 字节（旧 {} 字节 / 新 {} 字节）",
        step,
        position,
        old_text.len(),
        new_text.len()
    );
}
