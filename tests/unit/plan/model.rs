use super::*;

#[test]
fn layout_kind_is_lenient() {
    assert_eq!(LayoutKind::parse("timeline"), LayoutKind::Timeline);
    assert_eq!(LayoutKind::parse("  TimeLine "), LayoutKind::Timeline);
    assert_eq!(LayoutKind::parse("grid"), LayoutKind::Grid);
    assert_eq!(LayoutKind::parse("mosaic"), LayoutKind::Grid);

    let meta: PlanMeta = serde_json::from_str(r#"{"layout_type": 7}"#).unwrap();
    assert_eq!(meta.layout_type, LayoutKind::Grid);
    let meta: PlanMeta = serde_json::from_str(r#"{"layout_type": null}"#).unwrap();
    assert_eq!(meta.layout_type, LayoutKind::Grid);
    let meta: PlanMeta = serde_json::from_str("{}").unwrap();
    assert_eq!(meta.layout_type, LayoutKind::Grid);
    assert_eq!(meta.theme, "tech_blue");
}

#[test]
fn missing_sections_default_to_empty() {
    let plan: Plan = serde_json::from_str(r#"{"meta": {"layout_type": "timeline"}}"#).unwrap();
    assert_eq!(plan.layout(), LayoutKind::Timeline);
    assert!(plan.items().is_empty());
    assert!(plan.assets.images.is_empty());

    let plan: Plan = serde_json::from_str(r#"{"content": {"items": null}}"#).unwrap();
    assert!(plan.items().is_empty());
}

#[test]
fn items_tolerate_missing_fields_and_keep_spec_order() {
    let raw = r#"{
        "content": {
            "items": [
                {"id": "a", "specs": {"Zeta": "1", "Alpha": 2, "Mid": true}},
                {"title": "No id"}
            ]
        },
        "assets": {"images": [{"target_id": "a", "prompt": "p", "local_path": null}]}
    }"#;
    let plan: Plan = serde_json::from_str(raw).unwrap();
    let first = &plan.items()[0];
    assert_eq!(first.title, "");
    assert_eq!(
        first.specs.iter().collect::<Vec<_>>(),
        vec![
            (&"Zeta".to_string(), &"1".to_string()),
            (&"Alpha".to_string(), &"2".to_string()),
            (&"Mid".to_string(), &"true".to_string()),
        ]
    );
    assert_eq!(plan.items()[1].id, "");
    assert!(plan.assets.images[0].local_path().is_none());
}

#[test]
fn normalize_assigns_unique_ids() {
    let mut plan = Plan::new(
        LayoutKind::Grid,
        "t",
        vec![
            Item::new("", "a", ""),
            Item::new("item_1", "b", ""),
            Item::new("x", "c", ""),
            Item::new("x", "d", ""),
        ],
    );
    plan.normalize();
    let ids: Vec<_> = plan.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["item_1_2", "item_1", "x", "item_4"]);

    // A generated name that collides with an explicit id gets a numeric suffix.
    let mut plan = Plan::new(
        LayoutKind::Grid,
        "t",
        vec![Item::new("item_2", "a", ""), Item::new("", "b", "")],
    );
    plan.normalize();
    let ids: Vec<_> = plan.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["item_2", "item_2_2"]);
}

#[test]
fn normalize_keeps_explicit_ids_owned_by_later_items() {
    let raw = r#"{
        "content": {"items": [{"id": "", "title": "First"}, {"id": "item_1", "title": "Second"}]},
        "assets": {"images": [{"target_id": "item_1", "prompt": "second art"}]}
    }"#;
    let mut plan: Plan = serde_json::from_str(raw).unwrap();
    plan.normalize();
    let pairs: Vec<_> = plan
        .items()
        .iter()
        .map(|i| (i.title.as_str(), i.id.as_str()))
        .collect();
    assert_eq!(pairs, vec![("First", "item_1_2"), ("Second", "item_1")]);
    assert_eq!(plan.assets.images[0].target_id, "item_1");
}

#[test]
fn normalize_trims_ids_and_image_targets_alike() {
    let mut plan = Plan::new(LayoutKind::Grid, "t", vec![Item::new(" a ", "A", "")])
        .with_image("  a", "art");
    plan.normalize();
    assert_eq!(plan.items()[0].id, "a");
    assert_eq!(plan.assets.images[0].target_id, "a");
}

#[test]
fn wrongly_typed_collections_default_to_empty() {
    let raw = r#"{
        "meta": "timeline",
        "content": {
            "main_title": "Roadmap",
            "items": [
                {"id": "a", "title": "Alpha", "specs": [], "tags": "x"},
                {"id": "b", "title": "Beta", "specs": "none", "tags": ["t", 3]},
                "stray"
            ]
        },
        "assets": {"images": {"target_id": "a"}}
    }"#;
    let plan: Plan = serde_json::from_str(raw).unwrap();
    assert_eq!(plan.layout(), LayoutKind::Grid);
    assert_eq!(plan.content.main_title, "Roadmap");
    assert_eq!(plan.items().len(), 3);
    assert!(plan.items()[0].specs.is_empty());
    assert!(plan.items()[0].tags.is_empty());
    assert!(plan.items()[1].specs.is_empty());
    assert_eq!(plan.items()[1].tags, vec!["t".to_string(), "3".to_string()]);
    assert_eq!(plan.items()[2], Item::default());
    assert!(plan.assets.images.is_empty());

    let plan: Plan = serde_json::from_str(r#"{"content": {"items": {"id": "a"}}}"#).unwrap();
    assert!(plan.items().is_empty());
    let plan: Plan = serde_json::from_str(r#"{"content": 5, "assets": null}"#).unwrap();
    assert!(plan.items().is_empty());
}

#[test]
fn fallback_plan_has_single_grid_item() {
    let plan = Plan::fallback("Quarterly review\n1. revenue\n2. costs");
    assert_eq!(plan.layout(), LayoutKind::Grid);
    assert_eq!(plan.items().len(), 1);
    assert_eq!(plan.content.main_title, "Quarterly review");
    assert!(plan.items()[0].desc.contains("revenue"));

    let empty = Plan::fallback("   ");
    assert_eq!(empty.content.main_title, "Overview");
    assert_eq!(empty.items().len(), 1);
}

#[test]
fn attach_sets_path_once() {
    let dir = std::env::temp_dir().join(format!("slidegen_attach_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let first = dir.join("a.png");
    std::fs::write(&first, b"x").unwrap();

    let mut req = ImageRequest::new("a", "prompt");
    assert!(req.attach(first.clone()));
    assert!(req.is_resolved());
    assert!(!req.attach(dir.join("b.png")));
    assert_eq!(req.local_path(), Some(first.as_path()));

    std::fs::remove_dir_all(&dir).ok();
}
