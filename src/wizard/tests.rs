#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::config::{Config, LLMConfig, StoreBackend, StoreConfig};
    use crate::store::{Asset, AssetKind, MemoryStore, Project, ProjectStore, StoreError};
    use crate::types::assets::GeneratedLogo;
    use crate::wizard::{WizardContext, WizardController, WizardError, WizardStep};

    fn offline_config() -> Config {
        Config {
            llm: LLMConfig {
                api_key: String::new(),
                ..Default::default()
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn controller_with(store: Arc<dyn ProjectStore>) -> WizardController {
        let context = WizardContext::with_store(offline_config(), store).unwrap();
        WizardController::new(context, Uuid::new_v4())
    }

    /// 所有写操作都被拒绝的存储，用于验证保存失败阻断推进
    struct RejectingStore;

    #[async_trait]
    impl ProjectStore for RejectingStore {
        async fn fetch_project(&self, _project: Uuid) -> Result<Option<Project>, StoreError> {
            Ok(None)
        }

        async fn fetch_step(
            &self,
            _project: Uuid,
            _step: WizardStep,
        ) -> Result<Option<Value>, StoreError> {
            Ok(None)
        }

        async fn save_step(
            &self,
            _project: Uuid,
            _step: WizardStep,
            _payload: &Value,
        ) -> Result<(), StoreError> {
            Err(StoreError::Remote("写入被拒绝".to_string()))
        }

        async fn fetch_asset(
            &self,
            _project: Uuid,
            _kind: AssetKind,
        ) -> Result<Option<Asset>, StoreError> {
            Ok(None)
        }

        async fn save_asset(
            &self,
            _project: Uuid,
            _kind: AssetKind,
            _content: &str,
            _metadata: Option<Value>,
        ) -> Result<(), StoreError> {
            Err(StoreError::Remote("写入被拒绝".to_string()))
        }
    }

    #[test]
    fn test_step_sequence_order() {
        assert_eq!(WizardStep::SEQUENCE.len(), 9);
        assert_eq!(WizardStep::Basics.position(), 0);
        assert_eq!(WizardStep::Results.position(), 8);
        assert_eq!(WizardStep::Basics.following(), Some(WizardStep::BrandName));
        assert_eq!(WizardStep::Results.following(), None);
        assert_eq!(WizardStep::Basics.preceding(), None);
        assert_eq!(WizardStep::Results.preceding(), Some(WizardStep::Logo));
    }

    #[test]
    fn test_step_from_str_roundtrip() {
        for step in WizardStep::SEQUENCE {
            assert_eq!(step.as_str().parse::<WizardStep>().unwrap(), step);
        }
        assert!("checkout".parse::<WizardStep>().is_err());
    }

    #[test]
    fn test_story_gating_requires_all_three_fields() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));

        assert!(!wizard.step_ready(WizardStep::Story));

        wizard.form_mut().mission = "Fuel better mornings".to_string();
        wizard.form_mut().vision = "A cafe on every corner".to_string();
        // mission与vision俱备但values为空，仍不可前进
        assert!(!wizard.step_ready(WizardStep::Story));

        wizard.form_mut().values.push("craft".to_string());
        assert!(wizard.step_ready(WizardStep::Story));
    }

    #[test]
    fn test_basics_and_results_gating() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));

        assert!(!wizard.step_ready(WizardStep::Basics));
        wizard.form_mut().industry = "coffee".to_string();
        wizard.form_mut().business_name = "Driftwood".to_string();
        wizard.form_mut().product_service = "beans".to_string();
        assert!(wizard.step_ready(WizardStep::Basics));

        // Results恒可前进
        assert!(wizard.step_ready(WizardStep::Results));
    }

    #[test]
    fn test_logo_gating_accepts_ai_generated_logo() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));

        assert!(!wizard.step_ready(WizardStep::Logo));

        wizard.form_mut().ai_generated.logo = Some(GeneratedLogo {
            id: "L9".to_string(),
            url: "https://cdn.example.com/l9.png".to_string(),
            prompt: None,
        });
        assert!(wizard.step_ready(WizardStep::Logo));
    }

    #[test]
    fn test_previous_stops_at_first_step() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));

        assert_eq!(wizard.current_step(), WizardStep::Basics);
        assert_eq!(wizard.previous(), WizardStep::Basics);
    }

    #[tokio::test]
    async fn test_first_next_saves_even_empty_payload() {
        let store = Arc::new(MemoryStore::new());
        let mut wizard = controller_with(store.clone());
        let project = wizard.project_id;

        let step = wizard.next().await.unwrap();

        assert_eq!(step, WizardStep::BrandName);
        // 无缓存条目时必定保存，空表单也不例外
        assert_eq!(store.step_write_count(project, WizardStep::Basics).await, 1);
    }

    #[tokio::test]
    async fn test_unchanged_step_is_not_saved_twice() {
        let store = Arc::new(MemoryStore::new());
        let mut wizard = controller_with(store.clone());
        let project = wizard.project_id;

        wizard.next().await.unwrap();
        wizard.previous();
        wizard.next().await.unwrap();

        assert_eq!(store.step_write_count(project, WizardStep::Basics).await, 1);
    }

    #[tokio::test]
    async fn test_changed_step_is_saved_again() {
        let store = Arc::new(MemoryStore::new());
        let mut wizard = controller_with(store.clone());
        let project = wizard.project_id;

        wizard.next().await.unwrap();
        wizard.previous();
        wizard.form_mut().industry = "tea".to_string();
        wizard.next().await.unwrap();

        assert_eq!(store.step_write_count(project, WizardStep::Basics).await, 2);
    }

    #[tokio::test]
    async fn test_results_step_never_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut wizard = controller_with(store.clone());
        let project = wizard.project_id;

        // 直接把状态推到终点步骤
        while wizard.current_step() != WizardStep::Results {
            wizard.next().await.unwrap();
        }
        let writes_before = store.step_write_count(project, WizardStep::Results).await;

        let step = wizard.next().await.unwrap();

        assert_eq!(step, WizardStep::Results);
        assert_eq!(
            store.step_write_count(project, WizardStep::Results).await,
            writes_before
        );
    }

    #[tokio::test]
    async fn test_failed_save_blocks_navigation() {
        let mut wizard = controller_with(Arc::new(RejectingStore));
        wizard.form_mut().industry = "coffee".to_string();

        let result = wizard.next().await;

        assert!(matches!(
            result,
            Err(WizardError::SaveFailed {
                step: WizardStep::Basics,
                ..
            })
        ));
        // 状态不变：停留原步骤，缓存未被污染，下次操作即幂等重试
        assert_eq!(wizard.current_step(), WizardStep::Basics);
        assert!(wizard.step_cache().is_empty());
    }

    #[test]
    fn test_logo_payload_contains_only_selected_logo() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));
        wizard.form_mut().industry = "coffee".to_string();
        wizard.form_mut().logo = Some(GeneratedLogo {
            id: "L1".to_string(),
            url: "https://cdn.example.com/l1.png".to_string(),
            prompt: None,
        });

        let payload = wizard.resolve_step_payload(WizardStep::Logo).unwrap();

        assert_eq!(
            payload,
            json!({ "logo": { "id": "L1", "url": "https://cdn.example.com/l1.png" } })
        );
    }

    #[test]
    fn test_logo_payload_falls_back_to_ai_generated() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));
        wizard.form_mut().ai_generated.logo = Some(GeneratedLogo {
            id: "L2".to_string(),
            url: "https://cdn.example.com/l2.png".to_string(),
            prompt: None,
        });

        let payload = wizard.resolve_step_payload(WizardStep::Logo).unwrap();

        assert_eq!(
            payload,
            json!({ "logo": { "id": "L2", "url": "https://cdn.example.com/l2.png" } })
        );
    }

    #[test]
    fn test_step_payload_excludes_ai_generated() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));
        wizard.form_mut().industry = "coffee".to_string();
        wizard.form_mut().ai_generated.mission = "generated mission".to_string();

        let payload = wizard.resolve_step_payload(WizardStep::Basics).unwrap();

        assert_eq!(payload.get("industry"), Some(&json!("coffee")));
        assert!(payload.get("aiGenerated").is_none());
    }

    #[tokio::test]
    async fn test_update_step_merges_and_marks_validity() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));

        wizard
            .update_step(
                WizardStep::Basics,
                json!({ "industry": "coffee", "businessName": "Driftwood" }),
                false,
            )
            .await
            .unwrap();

        assert_eq!(wizard.form().industry, "coffee");
        assert_eq!(wizard.form().business_name, "Driftwood");
        assert_eq!(wizard.validity().get(&WizardStep::Basics), Some(&true));
    }

    #[tokio::test]
    async fn test_update_step_force_save_persists_changes() {
        let store = Arc::new(MemoryStore::new());
        let mut wizard = controller_with(store.clone());
        let project = wizard.project_id;

        wizard
            .update_step(
                WizardStep::Aesthetics,
                json!({ "visualStyle": "minimal" }),
                true,
            )
            .await
            .unwrap();
        // 同样的更新再来一次不触发第二次写入
        wizard
            .update_step(
                WizardStep::Aesthetics,
                json!({ "visualStyle": "minimal" }),
                true,
            )
            .await
            .unwrap();

        assert_eq!(
            store.step_write_count(project, WizardStep::Aesthetics).await,
            1
        );
    }

    #[tokio::test]
    async fn test_update_step_rejects_non_object_patch() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));

        let result = wizard
            .update_step(WizardStep::Basics, json!("not an object"), false)
            .await;

        assert!(matches!(result, Err(WizardError::PatchRejected)));
    }

    #[tokio::test]
    async fn test_select_logo_persists_with_project_metadata() {
        let store = Arc::new(MemoryStore::new());
        let mut wizard = controller_with(store.clone());
        let project = wizard.project_id;
        let logo = GeneratedLogo {
            id: "L1".to_string(),
            url: "https://cdn.example.com/l1.png".to_string(),
            prompt: Some("driftwood monogram".to_string()),
        };

        wizard.select_logo(logo.clone()).await.unwrap();

        assert_eq!(wizard.form().logo.as_ref(), Some(&logo));
        assert_eq!(wizard.form().ai_generated.logo.as_ref(), Some(&logo));
        assert_eq!(wizard.validity().get(&WizardStep::Logo), Some(&true));

        let asset = store
            .fetch_asset(project, AssetKind::Logo)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(asset.metadata_project_id(), Some(project.to_string()));
    }

    #[tokio::test]
    async fn test_select_generated_text_updates_ai_record() {
        let store = Arc::new(MemoryStore::new());
        let mut wizard = controller_with(store.clone());
        let project = wizard.project_id;

        wizard
            .select_generated_text(AssetKind::MissionStatement, "Fuel better mornings")
            .await
            .unwrap();

        assert_eq!(wizard.form().ai_generated.mission, "Fuel better mornings");
        let asset = store
            .fetch_asset(project, AssetKind::MissionStatement)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(asset.content, "Fuel better mornings");
    }

    #[tokio::test]
    async fn test_select_generated_text_rejects_structured_kinds() {
        let mut wizard = controller_with(Arc::new(MemoryStore::new()));

        let result = wizard
            .select_generated_text(AssetKind::ColorPalette, "#112233")
            .await;

        assert!(matches!(
            result,
            Err(WizardError::NotTextAsset(AssetKind::ColorPalette))
        ));
    }
}
