use crate::*;

fn insert(name: &str) -> InsertProject {
    InsertProject {
        name: name.to_string(),
        domain: "Finance".to_string(),
        description: "Ledger".to_string(),
        ..Default::default()
    }
}

#[test]
fn create_assigns_unique_ids() {
    let mut store = MemoryProjectStore::new();
    let a = store.create(insert("A"));
    let b = store.create(insert("B"));
    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);
    assert_eq!(store.get(&a.id), Some(a));
    assert_eq!(store.len(), 2);
}

#[test]
fn get_unknown_id_is_none() {
    let store = MemoryProjectStore::new();
    assert!(store.get("missing").is_none());
}

#[test]
fn update_merges_and_persists() {
    let mut store = MemoryProjectStore::new();
    let created = store.create(insert("A"));

    let updated = store
        .update(
            &created.id,
            ProjectPatch {
                description: Some("General ledger".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "A");
    assert_eq!(updated.description, "General ledger");
    assert_eq!(store.get(&created.id), Some(updated));
}

#[test]
fn update_unknown_id_is_none() {
    let mut store = MemoryProjectStore::new();
    assert!(store.update("missing", ProjectPatch::default()).is_none());
}

#[test]
fn list_all_keeps_creation_order() {
    let mut store = MemoryProjectStore::new();
    for name in ["first", "second", "third"] {
        store.create(insert(name));
    }
    let names: Vec<String> = store.list_all().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}
