//! 数据规范化 - 为变更检测提供可比较的标准形式

use serde_json::{Map, Value};

/// 递归规范化一个嵌套JSON值
///
/// 规则：
/// - null保持为null（数据模型中唯一的"缺失"标记）；
/// - 数组逐元素递归规范化，元素一律保留（空值只从映射中剔除）；
/// - 映射按键排序遍历，先规范化子值，规范化结果为空
///   （null、空字符串、空数组、空映射）的键被整体剔除；
/// - 标量原样返回。
///
/// 纯函数，无副作用，对任意有限无环结构必然终止。
/// 先规范化子值再判空，保证规范化结果是不动点：
/// 对已规范化的值再次规范化得到完全相同的值。
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Object(fields) => {
            let mut result = Map::new();
            let mut keys: Vec<&String> = fields.keys().collect();
            keys.sort();

            for key in keys {
                let normalized = normalize(&fields[key]);
                if is_empty(&normalized) {
                    continue;
                }
                result.insert(key.clone(), normalized);
            }

            Value::Object(result)
        }
        scalar => scalar.clone(),
    }
}

/// 规范化意义上的"空"：null、空字符串、空数组、空映射
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

// Include tests
#[cfg(test)]
mod tests;
