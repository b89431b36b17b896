use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// AI生成的Logo对象，外部图像服务产出后由用户选定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLogo {
    pub id: String,
    pub url: String,
    /// 生成该Logo所用的提示词（历史数据可能缺失）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// AI生成的品牌色板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedColorPalette {
    /// 色板名称
    pub name: String,
    /// 色板包含的颜色，按主次排列
    pub colors: Vec<PaletteColor>,
    /// 配色思路说明
    pub rationale: String,
}

/// 色板中的单个颜色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColor {
    /// 十六进制颜色值，形如 #RRGGBB
    pub hex: String,
    /// 该颜色在品牌视觉中的角色，如 primary、accent
    pub role: String,
}

impl GeneratedColorPalette {
    /// 检查色板内所有颜色值是否均为合法的 #RRGGBB 形式
    pub fn all_colors_valid(&self) -> bool {
        let hex_pattern = regex::Regex::new(r"^#[0-9a-fA-F]{6}$").expect("静态正则必定合法");
        self.colors.iter().all(|c| hex_pattern.is_match(&c.hex))
    }
}
