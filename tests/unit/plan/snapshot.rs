use super::*;
use crate::plan::model::{Item, LayoutKind};

#[test]
fn snapshot_survives_disk_and_keeps_spec_order() {
    let dir = std::env::temp_dir().join(format!("slidegen_snapshot_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("plan.json");

    let plan = Plan::new(
        LayoutKind::Timeline,
        "Roadmap",
        vec![
            Item::new("q1", "Q1", "ship")
                .with_spec("Owner", "Ana")
                .with_spec("Budget", "10k"),
        ],
    );
    let mut asset_map = AssetMap::default();
    asset_map.insert("q1", dir.join("q1.png"));

    let snapshot = PlanSnapshot::new(plan, asset_map);
    snapshot.save(&path).unwrap();
    let loaded = PlanSnapshot::load(&path).unwrap();
    assert_eq!(loaded, snapshot);
    let labels: Vec<_> = loaded.plan.items()[0].specs.keys().cloned().collect();
    assert_eq!(labels, vec!["Owner".to_string(), "Budget".to_string()]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_reports_invalid_json() {
    let dir = std::env::temp_dir().join(format!("slidegen_snapshot_bad_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("plan.json");
    std::fs::write(&path, "{").unwrap();
    assert!(matches!(PlanSnapshot::load(&path), Err(SlideError::Serde(_))));
    std::fs::remove_dir_all(&dir).ok();
}
