//! Integration tests for parentele-store
//!
//! These tests verify paging, act scoping and the delete-then-insert cycle
//! for relation rows.

use parentele_domain::traits::RelationStore;
use parentele_domain::{
    ActeScope, ActeType, Actor, ActorId, RelationCandidate, RelationMode, RelationPreview, Statut,
};
use parentele_store::SqliteStore;

fn actor(id: &str, acte_id: &str, role: &str) -> Actor {
    Actor {
        id: ActorId::new(id),
        acte_id: acte_id.to_string(),
        source_table: "actes_naissance".to_string(),
        nom: Some("Martin".to_string()),
        prenom: Some(format!("Prénom {}", id)),
        qualite: None,
        role: Some(role.to_string()),
        acte_type: ActeType::Naissance,
    }
}

fn candidate(id: &str, source: &str, acte_id: &str, lien: &str) -> RelationCandidate {
    RelationCandidate {
        id: id.to_string(),
        acteur_source_id: ActorId::new(source),
        acteur_source_role: Some("témoin".to_string()),
        acte_id: acte_id.to_string(),
        source_table: "actes_naissance".to_string(),
        lien: lien.to_string(),
    }
}

fn relation(source: &str, cible: Option<&str>, mode: RelationMode, statut: Statut) -> RelationPreview {
    RelationPreview {
        acte_id: "1".to_string(),
        source_table: "actes_naissance".to_string(),
        acteur_source_id: ActorId::new(source),
        acteur_source_role: Some("témoin".to_string()),
        acteur_cible_id: cible.map(ActorId::new),
        acteur_cible_role: Some("père".to_string()),
        relation_type: Some("frère".to_string()),
        relation_mode: mode,
        relation_precision: None,
        source_mention: "frère du père".to_string(),
        statut,
    }
}

fn scope() -> ActeScope {
    ActeScope::new("1", "actes_naissance")
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_actor_paging() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let actors: Vec<Actor> = (0..5).map(|i| actor(&format!("a{}", i), "1", "témoin")).collect();
    assert_eq!(store.insert_actors(&actors).unwrap(), 5);

    let first = store.fetch_actors_page(0, 2).unwrap();
    let second = store.fetch_actors_page(2, 2).unwrap();
    let last = store.fetch_actors_page(4, 2).unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(last.len(), 1, "Last page should be short");
    assert_eq!(first[0].id.as_str(), "a0");
    assert_eq!(last[0].id.as_str(), "a4");
    assert_eq!(last[0].acte_type, ActeType::Naissance);
}

#[test]
fn test_fetch_actors_for_act_is_scoped() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .insert_actors(&[actor("a1", "1", "père"), actor("a2", "1", "enfant"), actor("b1", "2", "père")])
        .unwrap();

    let actors = store.fetch_actors_for_act(&scope()).unwrap();
    assert_eq!(actors.len(), 2);
    assert!(actors.iter().all(|a| a.acte_id == "1"));
}

#[test]
fn test_candidates_roundtrip_and_lookup() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .insert_candidates(&[
            candidate("c1", "a1", "1", "oncle de l'enfant"),
            candidate("c2", "b1", "2", "fille du défunt"),
            candidate("c3", "b1", "2", "marraine de l'enfant"),
        ])
        .unwrap();

    let page = store.fetch_candidates_page(0, 10).unwrap();
    assert_eq!(page.len(), 3);

    let for_act = store.fetch_candidates_for_act(&scope()).unwrap();
    assert_eq!(for_act.len(), 1);
    assert_eq!(for_act[0].lien, "oncle de l'enfant");

    let found = store.get_candidates_for_actor(&ActorId::new("b1")).unwrap();
    let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c2", "c3"]);
    assert!(store.get_candidates_for_actor(&ActorId::new("zz")).unwrap().is_empty());
}

#[test]
fn test_get_actor() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.insert_actors(&[actor("a1", "1", "père")]).unwrap();

    let found = store.get_actor(&ActorId::new("a1")).unwrap();
    assert_eq!(found.and_then(|a| a.role), Some("père".to_string()));
    assert!(store.get_actor(&ActorId::new("zz")).unwrap().is_none());
}

#[test]
fn test_relations_roundtrip() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let rows = vec![
        relation("a1", Some("a2"), RelationMode::Explicite, Statut::Unique),
        relation("a1", None, RelationMode::Explicite, Statut::Introuvable),
    ];

    assert_eq!(store.upsert_relations(&rows).unwrap(), 2);

    let stored = store.fetch_existing_relations(&scope()).unwrap();
    assert_eq!(stored, rows);
}

#[test]
fn test_upsert_empty_is_noop() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    assert_eq!(store.upsert_relations(&[]).unwrap(), 0);
}

#[test]
fn test_delete_by_source_actor() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .upsert_relations(&[
            relation("a1", Some("a2"), RelationMode::Explicite, Statut::Unique),
            relation("a3", Some("a2"), RelationMode::Explicite, Statut::Unique),
        ])
        .unwrap();

    let deleted = store
        .delete_relations_by_source_actor(&scope(), &ActorId::new("a1"))
        .unwrap();
    assert_eq!(deleted, 1);

    let remaining = store.fetch_existing_relations(&scope()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].acteur_source_id.as_str(), "a3");
}

#[test]
fn test_delete_by_mode_keeps_explicit_rows() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .upsert_relations(&[
            relation("a1", Some("a2"), RelationMode::Explicite, Statut::Unique),
            relation("a3", Some("a2"), RelationMode::Implicite, Statut::Unique),
        ])
        .unwrap();

    assert_eq!(store.delete_relations_by_mode(&scope(), RelationMode::Implicite).unwrap(), 1);

    let remaining = store.fetch_existing_relations(&scope()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].relation_mode, RelationMode::Explicite);
}

#[test]
fn test_delete_by_act() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .upsert_relations(&[relation("a1", Some("a2"), RelationMode::Explicite, Statut::Unique)])
        .unwrap();

    assert_eq!(store.delete_relations_by_act(&scope()).unwrap(), 1);
    assert!(store.fetch_existing_relations(&scope()).unwrap().is_empty());
}

#[test]
fn test_on_disk_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parentele.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.insert_actors(&[actor("a1", "1", "père")]).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.fetch_actors_for_act(&scope()).unwrap().len(), 1);
}
