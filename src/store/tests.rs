#[cfg(test)]
mod tests {
    use crate::store::{Asset, AssetKind, MemoryStore, Project, ProjectStore};
    use crate::wizard::WizardStep;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_asset_kind_roundtrip() {
        for kind in AssetKind::ALL {
            assert_eq!(kind.as_str().parse::<AssetKind>().unwrap(), kind);
        }

        assert!("hologram".parse::<AssetKind>().is_err());
    }

    #[test]
    fn test_asset_kind_display() {
        assert_eq!(AssetKind::BrandName.to_string(), "brand_name");
        assert_eq!(AssetKind::MissionStatement.to_string(), "mission_statement");
        assert_eq!(AssetKind::Logos.to_string(), "logos");
        assert_eq!(AssetKind::Moodboard.to_string(), "moodboard");
    }

    #[test]
    fn test_asset_metadata_project_id() {
        let asset = Asset {
            content: "{}".to_string(),
            metadata: Some(json!({ "projectId": "p-1", "timestamp": "2025-01-01T00:00:00Z" })),
        };
        assert_eq!(asset.metadata_project_id(), Some("p-1".to_string()));

        let bare = Asset {
            content: "{}".to_string(),
            metadata: None,
        };
        assert_eq!(bare.metadata_project_id(), None);
    }

    #[tokio::test]
    async fn test_memory_store_project_roundtrip() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(store.fetch_project(id).await.unwrap().is_none());

        store
            .put_project(&Project {
                id,
                name: "Lumen Tea".to_string(),
                industry: "tea".to_string(),
                completion_percentage: 40,
            })
            .await;

        let project = store.fetch_project(id).await.unwrap().unwrap();
        assert_eq!(project.name, "Lumen Tea");
        assert_eq!(project.completion_percentage, 40);
    }

    #[tokio::test]
    async fn test_memory_store_step_overwrite_and_count() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(
            store
                .fetch_step(id, WizardStep::Basics)
                .await
                .unwrap()
                .is_none()
        );

        store
            .save_step(id, WizardStep::Basics, &json!({ "industry": "coffee" }))
            .await
            .unwrap();
        store
            .save_step(id, WizardStep::Basics, &json!({ "industry": "tea" }))
            .await
            .unwrap();

        let stored = store.fetch_step(id, WizardStep::Basics).await.unwrap();
        assert_eq!(stored, Some(json!({ "industry": "tea" })));
        assert_eq!(store.step_write_count(id, WizardStep::Basics).await, 2);
    }

    #[tokio::test]
    async fn test_memory_store_assets_are_scoped_by_kind() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        store
            .save_asset(id, AssetKind::BrandName, "Lumen", None)
            .await
            .unwrap();

        let fetched = store
            .fetch_asset(id, AssetKind::BrandName)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.content, "Lumen");
        assert_eq!(store.asset_write_count(id, AssetKind::BrandName).await, 1);

        assert!(
            store
                .fetch_asset(id, AssetKind::MissionStatement)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_memory_store_asset_metadata_survives() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let metadata = json!({ "projectId": id.to_string() });

        store
            .save_asset(id, AssetKind::Logo, r#"{"id":"L1","url":"u"}"#, Some(metadata))
            .await
            .unwrap();

        let asset = store.fetch_asset(id, AssetKind::Logo).await.unwrap().unwrap();
        assert_eq!(asset.metadata_project_id(), Some(id.to_string()));
    }
}
