use printify_agent_common::types::*;
use serde_json::json;

#[test]
fn test_session_id_creation() {
    let id1 = SessionId::new();
    let id2 = SessionId::new();

    assert_ne!(id1, id2);
    assert_eq!(id1, id1.clone());
}

#[test]
fn test_session_id_from_string() {
    let id_str = "session-123".to_string();
    let id = SessionId::from_string(id_str.clone());

    assert_eq!(id.0, id_str);
    assert_eq!(id.to_string(), "session-123");
}

#[test]
fn test_catalog_item_keeps_extra_fields() {
    let raw = json!({
        "id": 384,
        "title": "Coffee Mug",
        "brand": "Generic",
        "images": ["a.png"]
    });

    let item: CatalogItem = serde_json::from_value(raw).unwrap();
    assert_eq!(item.id, 384);
    assert_eq!(item.title, "Coffee Mug");
    assert_eq!(item.extra.get("brand"), Some(&json!("Generic")));

    let back = serde_json::to_value(&item).unwrap();
    assert_eq!(back["images"], json!(["a.png"]));
}

#[test]
fn test_catalog_item_requires_id_and_title() {
    assert!(serde_json::from_value::<CatalogItem>(json!({"title": "Mug"})).is_err());
    assert!(serde_json::from_value::<CatalogItem>(json!({"id": 1})).is_err());
}

#[test]
fn test_catalog_kind_wording() {
    assert_eq!(CatalogKind::PrintProvider.to_string(), "print provider");
    assert_eq!(CatalogKind::Variant.plural(), "variants");
    assert_eq!(CatalogKind::Blueprint.selection_phrase(2), "select blueprint 2");
}
