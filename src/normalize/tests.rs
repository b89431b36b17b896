#[cfg(test)]
mod tests {
    use crate::normalize::normalize;
    use serde_json::{Value, json};

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(normalize(&json!(42)), json!(42));
        assert_eq!(normalize(&json!(1.5)), json!(1.5));
        assert_eq!(normalize(&json!(true)), json!(true));
        assert_eq!(normalize(&json!("brand")), json!("brand"));
    }

    #[test]
    fn test_null_stays_null() {
        assert_eq!(normalize(&Value::Null), Value::Null);
    }

    #[test]
    fn test_empty_values_dropped_from_mappings() {
        let input = json!({
            "industry": "coffee",
            "businessName": "",
            "values": [],
            "demographics": {},
            "logo": null
        });

        assert_eq!(normalize(&input), json!({ "industry": "coffee" }));
    }

    #[test]
    fn test_all_empty_mapping_normalizes_to_empty_mapping() {
        let input = json!({
            "a": "",
            "b": [],
            "c": {},
            "d": null
        });

        assert_eq!(normalize(&input), json!({}));
    }

    #[test]
    fn test_arrays_keep_their_elements() {
        // 空值只从映射中剔除，数组元素原样保留
        let input = json!({ "tags": ["", "bold", ""] });
        assert_eq!(normalize(&input), json!({ "tags": ["", "bold", ""] }));
    }

    #[test]
    fn test_nested_emptiness_collapses_upward() {
        // 子映射规范化后变空，则其所在键也被剔除
        let input = json!({
            "story": { "mission": "" },
            "vision": "see further"
        });

        assert_eq!(normalize(&input), json!({ "vision": "see further" }));
    }

    #[test]
    fn test_idempotence_is_a_fixed_point() {
        let input = json!({
            "story": { "mission": "", "values": ["quality"] },
            "competitors": [{ "name": "Acme", "strengths": "" }],
            "empty": {},
            "demographics": { "ageRange": "25-34", "gender": "" }
        });

        let once = normalize(&input);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_key_order_permutation_yields_identical_serialization() {
        let forward: Value =
            serde_json::from_str(r#"{"industry":"tea","businessName":"Lumen","values":["calm"]}"#)
                .unwrap();
        let backward: Value =
            serde_json::from_str(r#"{"values":["calm"],"businessName":"Lumen","industry":"tea"}"#)
                .unwrap();

        let left = serde_json::to_string(&normalize(&forward)).unwrap();
        let right = serde_json::to_string(&normalize(&backward)).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_deep_nesting_terminates_and_sorts() {
        let input = json!({
            "z": { "b": { "c": ["x", { "k": "v", "a": "" }] } },
            "a": 1
        });

        let normalized = normalize(&input);
        assert_eq!(
            normalized,
            json!({
                "a": 1,
                "z": { "b": { "c": ["x", { "k": "v" }] } }
            })
        );
    }
}
