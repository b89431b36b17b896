//! 步骤缓存 - 记录每个步骤最近一次确认落库的规范化载荷

use std::collections::HashMap;

use serde_json::Value;

use crate::normalize::normalize;
use crate::wizard::WizardStep;

/// 步骤缓存
///
/// 不变量：某步骤一旦存在条目，该条目必须恰好对应该步骤最近一次
/// 确认持久化成功的载荷：条目过旧会导致静默丢失编辑，条目过新
/// 会导致冗余写入。条目在会话内只会被覆盖，不会被删除。
#[derive(Debug, Default)]
pub struct StepCache {
    entries: HashMap<WizardStep, Value>,
}

impl StepCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// 判断候选载荷是否需要保存
    ///
    /// 无缓存条目时恒为true（强制首次保存，包括空载荷）；
    /// 否则比较规范化后的结构是否与缓存条目相等。比较基于
    /// `serde_json::Value`的结构相等，而非序列化文本对比，
    /// 以避免浮点格式化等序列化噪声造成的误判。
    pub fn should_save(&self, step: WizardStep, candidate: &Value) -> bool {
        match self.entries.get(&step) {
            None => true,
            Some(cached) => normalize(candidate) != *cached,
        }
    }

    /// 保存成功后记录该步骤的规范化载荷，覆盖旧条目
    pub fn record(&mut self, step: WizardStep, payload: &Value) {
        self.entries.insert(step, normalize(payload));
    }

    /// 加载阶段用已持久化的载荷初始化条目，避免不必要的首次保存
    pub fn seed(&mut self, step: WizardStep, payload: &Value) {
        self.record(step, payload);
    }

    /// 获取某步骤的缓存条目（规范化形式）
    pub fn entry(&self, step: WizardStep) -> Option<&Value> {
        self.entries.get(&step)
    }

    /// 已缓存的步骤数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
