use super::*;

fn seeded(names: &[&str]) -> Catalog {
    let mut catalog = Catalog::new();
    for name in names {
        catalog.add(name, "1 Test Rd", "Testville", false).unwrap();
    }
    catalog
}

fn id_of(catalog: &Catalog, name: &str) -> String {
    catalog
        .properties()
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id.clone())
        .unwrap()
}

// =============================================================================
// add
// =============================================================================

#[test]
fn add_appends_inactive_property() {
    let mut catalog = Catalog::new();
    let p = catalog.add("Home", "123 Main St", "Anytown", true).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(p.is_primary);
    assert!(!p.is_active);
    assert!(p.image_url.is_none());
    assert_eq!(catalog.get(&p.id), Some(&p));
}

#[test]
fn add_assigns_unique_ids() {
    let catalog = seeded(&["A", "B", "C"]);
    let mut ids: Vec<&str> = catalog.properties().iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn add_blank_name_is_rejected() {
    let mut catalog = Catalog::new();
    let err = catalog.add("", "123 Main St", "Anytown", true).unwrap_err();
    assert_eq!(err, CatalogError::Validation { field: "name" });
    assert!(catalog.is_empty());
}

#[test]
fn add_whitespace_address_is_rejected() {
    let mut catalog = Catalog::new();
    let err = catalog.add("Home", "   ", "Anytown", false).unwrap_err();
    assert_eq!(err, CatalogError::Validation { field: "address" });
    assert!(catalog.is_empty());
}

#[test]
fn add_empty_city_is_allowed() {
    let mut catalog = Catalog::new();
    assert!(catalog.add("Cabin", "9 Lake Rd", "", false).is_ok());
}

#[test]
fn length_counts_only_successful_adds() {
    let mut catalog = Catalog::new();
    let attempts = [("A", "1 St"), ("", "2 St"), ("C", ""), ("D", "4 St"), (" ", " ")];
    let ok = attempts
        .iter()
        .filter(|(name, address)| catalog.add(name, address, "", false).is_ok())
        .count();
    assert_eq!(ok, 2);
    assert_eq!(catalog.len(), ok);
}

// =============================================================================
// set_active
// =============================================================================

#[test]
fn set_active_moves_between_properties() {
    let mut catalog = Catalog::new();
    let p1 = catalog.add("P1", "1 St", "", false).unwrap();
    catalog.set_active(&p1.id).unwrap();
    let p2 = catalog.add("P2", "2 St", "", false).unwrap();
    catalog.set_active(&p2.id).unwrap();

    assert!(!catalog.get(&p1.id).unwrap().is_active);
    assert!(catalog.get(&p2.id).unwrap().is_active);
    assert_eq!(catalog.active().map(|p| p.name.as_str()), Some("P2"));
}

#[test]
fn at_most_one_active_after_any_sequence() {
    let mut catalog = seeded(&["A", "B", "C", "D"]);
    let ids: Vec<String> = catalog.properties().iter().map(|p| p.id.clone()).collect();
    for id in ids.iter().chain(ids.iter().rev()).chain([&ids[2], &ids[2]]) {
        catalog.set_active(id).unwrap();
        let active = catalog.properties().iter().filter(|p| p.is_active).count();
        assert_eq!(active, 1);
    }
}

#[test]
fn set_active_unknown_id_leaves_state() {
    let mut catalog = seeded(&["A"]);
    let id = id_of(&catalog, "A");
    catalog.set_active(&id).unwrap();

    let err = catalog.set_active("missing").unwrap_err();
    assert_eq!(err, CatalogError::NotFound("missing".into()));
    assert!(catalog.get(&id).unwrap().is_active);
}

// =============================================================================
// toggle_primary
// =============================================================================

#[test]
fn toggle_primary_twice_restores() {
    let mut catalog = seeded(&["A"]);
    let id = id_of(&catalog, "A");
    assert!(catalog.toggle_primary(&id).unwrap());
    assert!(!catalog.toggle_primary(&id).unwrap());
    assert!(!catalog.get(&id).unwrap().is_primary);
}

#[test]
fn toggle_primary_does_not_touch_others() {
    let mut catalog = seeded(&["A", "B"]);
    let a = id_of(&catalog, "A");
    let b = id_of(&catalog, "B");
    catalog.toggle_primary(&a).unwrap();
    catalog.toggle_primary(&b).unwrap();
    assert!(catalog.get(&a).unwrap().is_primary);
    assert!(catalog.get(&b).unwrap().is_primary);
}

#[test]
fn toggle_primary_unknown_id() {
    let mut catalog = Catalog::new();
    assert!(matches!(catalog.toggle_primary("nope"), Err(CatalogError::NotFound(_))));
}

// =============================================================================
// sorted_view
// =============================================================================

#[test]
fn sorted_view_orders_by_name_without_flags() {
    let catalog = seeded(&["B", "A", "C"]);
    assert_eq!(catalog.sorted_view().names(), vec!["A", "B", "C"]);
}

#[test]
fn sorted_view_active_then_primary_then_name() {
    let mut catalog = Catalog::new();
    catalog.add("Delta", "1 St", "", false).unwrap();
    catalog.add("Charlie", "2 St", "", true).unwrap();
    catalog.add("Bravo", "3 St", "", false).unwrap();
    catalog.add("Alpha", "4 St", "", true).unwrap();
    let bravo = id_of(&catalog, "Bravo");
    catalog.set_active(&bravo).unwrap();

    assert_eq!(catalog.sorted_view().names(), vec!["Bravo", "Alpha", "Charlie", "Delta"]);
}

#[test]
fn sorted_view_name_is_case_sensitive() {
    let catalog = seeded(&["apple", "Banana", "Apple"]);
    assert_eq!(catalog.sorted_view().names(), vec!["Apple", "Banana", "apple"]);
}

#[test]
fn sorted_view_ties_keep_insertion_order() {
    let catalog = seeded(&["Same", "Same"]);
    let ids: Vec<&str> = catalog.sorted_view().iter().map(|p| p.id.as_str()).collect();
    let stored: Vec<&str> = catalog.properties().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, stored);
}

#[test]
fn sorted_view_is_permutation_and_idempotent() {
    let mut catalog = seeded(&["Q", "W", "E", "R"]);
    let w = id_of(&catalog, "W");
    catalog.toggle_primary(&w).unwrap();

    let first: Vec<String> = catalog.sorted_view().iter().map(|p| p.id.clone()).collect();
    let second: Vec<String> = catalog.sorted_view().iter().map(|p| p.id.clone()).collect();
    assert_eq!(first, second);

    let mut sorted_ids = first.clone();
    sorted_ids.sort();
    let mut stored: Vec<String> = catalog.properties().iter().map(|p| p.id.clone()).collect();
    stored.sort();
    assert_eq!(sorted_ids, stored);
}

#[test]
fn sorted_view_is_restartable() {
    let catalog = seeded(&["B", "A"]);
    let view = catalog.sorted_view();
    let a: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
    let b: Vec<&str> = (&view).into_iter().map(|p| p.name.as_str()).collect();
    assert_eq!(a, b);
    assert_eq!(view.len(), catalog.len());
}

#[test]
fn sorted_view_does_not_mutate_storage() {
    let catalog = seeded(&["C", "B", "A"]);
    let _ = catalog.sorted_view();
    let stored: Vec<&str> = catalog.properties().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(stored, vec!["C", "B", "A"]);
}

// =============================================================================
// reset / misc
// =============================================================================

#[test]
fn reset_clears_everything() {
    let mut catalog = seeded(&["A", "B"]);
    catalog.reset();
    assert!(catalog.is_empty());
    assert!(catalog.sorted_view().is_empty());
}

#[test]
fn image_label_falls_back() {
    let mut catalog = Catalog::new();
    let mut p = catalog.add("Home", "1 St", "", false).unwrap();
    assert_eq!(p.image_label(), IMAGE_FALLBACK_LABEL);
    p.image_url = Some("https://img.example/1.png".into());
    assert_eq!(p.image_label(), "https://img.example/1.png");
}

#[test]
fn property_serializes_camel_case() {
    let mut catalog = Catalog::new();
    let p = catalog.add("Home", "1 St", "Town", true).unwrap();
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json.get("isPrimary"), Some(&serde_json::json!(true)));
    assert_eq!(json.get("isActive"), Some(&serde_json::json!(false)));
    assert!(json.get("imageUrl").is_some());
}
