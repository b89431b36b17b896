//! 品牌文案生成的提示词模板

use crate::llm::client::{GenerationInputs, GenerationKind};

/// 各生成类型的系统提示词
pub fn system_prompt(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::BrandName => {
            "You are a senior brand naming consultant. Propose one distinctive, \
             easy-to-pronounce brand name for the business described by the user. \
             Respond with the name only, no quotes and no commentary."
        }
        GenerationKind::Mission => {
            "You are a brand strategist. Write a single concise mission statement \
             (one or two sentences) for the business described by the user. \
             Respond with the statement only."
        }
        GenerationKind::Vision => {
            "You are a brand strategist. Write a single aspirational vision statement \
             (one or two sentences) for the business described by the user. \
             Respond with the statement only."
        }
        GenerationKind::Values => {
            "You are a brand strategist. List three to five core brand values for the \
             business described by the user, one per line, each a short phrase. \
             Respond with the list only."
        }
        GenerationKind::OriginStory => {
            "You are a brand storyteller. Write a short origin story (one paragraph) \
             for the business described by the user. Respond with the story only."
        }
    }
}

/// 由结构化输入拼装用户提示词
pub fn user_prompt(inputs: &GenerationInputs) -> String {
    format!(
        "Industry: {}\nBusiness name: {}\nProduct or service: {}",
        inputs.industry, inputs.name, inputs.product_service
    )
}

/// 色板生成的系统提示词（结构化提取）
pub const PALETTE_SYSTEM_PROMPT: &str =
    "You are a brand designer. Design a cohesive brand color palette of four to six \
     colors for the business described by the user. Every color must carry a hex value \
     in #RRGGBB form and a role such as primary, secondary, accent or neutral, and the \
     palette needs a short name plus a one-paragraph rationale.";
