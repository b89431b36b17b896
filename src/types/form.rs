use serde::{Deserialize, Serialize};

use crate::types::assets::{GeneratedColorPalette, GeneratedLogo};

/// 向导表单聚合 — 所有步骤作答的单一可变载体
///
/// 向导启动时以固定默认值创建，挂载时与已持久化的步骤数据、
/// 资产数据合并，随后由各步骤就地修改。序列化采用camelCase，
/// 与存量项目的持久化载荷保持一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub industry: String,
    pub business_name: String,
    pub product_service: String,
    pub unique_selling_proposition: String,

    pub demographics: Demographics,
    pub psychographics: Psychographics,

    pub personality_traits: Vec<PersonalityTrait>,
    pub selected_archetype: String,

    pub mission: String,
    pub vision: String,
    pub values: Vec<String>,
    pub origin_story: String,

    pub competitors: Vec<Competitor>,
    pub differentiators: Vec<String>,

    pub visual_style: String,
    pub color_preferences: Vec<String>,
    pub inspiration_keywords: Vec<String>,
    pub moodboard_urls: Vec<String>,

    pub brand_name: String,
    pub logo: Option<GeneratedLogo>,

    pub ai_generated: AiGenerated,
}

/// 目标受众 — 人口统计维度
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Demographics {
    pub age_range: String,
    pub gender: String,
    pub location: String,
    pub income: String,
    pub education: String,
}

impl Demographics {
    /// 任一维度已填写
    pub fn any_filled(&self) -> bool {
        [
            &self.age_range,
            &self.gender,
            &self.location,
            &self.income,
            &self.education,
        ]
        .iter()
        .any(|field| !field.is_empty())
    }
}

/// 目标受众 — 心理画像维度
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Psychographics {
    pub interests: Vec<String>,
    pub values: Vec<String>,
    pub pain_points: Vec<String>,
    pub goals: Vec<String>,
}

impl Psychographics {
    /// 任一列表已有内容
    pub fn any_filled(&self) -> bool {
        [
            &self.interests,
            &self.values,
            &self.pain_points,
            &self.goals,
        ]
        .iter()
        .any(|list| !list.is_empty())
    }
}

/// 品牌个性滑杆，value取值0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityTrait {
    pub label: String,
    pub value: u8,
}

/// 竞争对手条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Competitor {
    pub name: String,
    pub strengths: String,
    pub weaknesses: String,
}

/// AI生成内容的候选集合，与用户手填字段分开存放
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiGenerated {
    pub brand_name: String,
    pub mission: String,
    pub vision: String,
    pub value_proposition: String,
    pub brand_essence: String,
    pub brand_voice: String,
    pub color_palette: Option<GeneratedColorPalette>,
    pub logo: Option<GeneratedLogo>,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            industry: String::new(),
            business_name: String::new(),
            product_service: String::new(),
            unique_selling_proposition: String::new(),
            demographics: Demographics::default(),
            psychographics: Psychographics::default(),
            personality_traits: Self::default_personality_traits(),
            selected_archetype: String::new(),
            mission: String::new(),
            vision: String::new(),
            values: Vec::new(),
            origin_story: String::new(),
            competitors: Vec::new(),
            differentiators: Vec::new(),
            visual_style: String::new(),
            color_preferences: Vec::new(),
            inspiration_keywords: Vec::new(),
            moodboard_urls: Vec::new(),
            brand_name: String::new(),
            logo: None,
            ai_generated: AiGenerated::default(),
        }
    }
}

impl FormData {
    /// 五组品牌个性滑杆，初始值居中
    fn default_personality_traits() -> Vec<PersonalityTrait> {
        [
            "Playfulness vs. Seriousness",
            "Modern vs. Traditional",
            "Luxurious vs. Accessible",
            "Bold vs. Subtle",
            "Formal vs. Relaxed",
        ]
        .iter()
        .map(|label| PersonalityTrait {
            label: (*label).to_string(),
            value: 50,
        })
        .collect()
    }
}
