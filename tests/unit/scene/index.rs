use super::*;
use crate::scene::model::{VisualObject, VisualRelation};

fn state() -> RenderedState {
    RenderedState::new("blocks-world")
        .object(VisualObject::new("a", "block").with("held", true))
        .object(VisualObject::new("b", "block"))
        .object(VisualObject::new("c", "block").with("held", "true"))
        .object(VisualObject::new("a", "surface"))
        .relation(VisualRelation::new("holding", "hand", "b"))
        .relation(VisualRelation::new("on", "c", "table"))
        .relation(VisualRelation::unary("clear", "a"))
}

#[test]
fn first_object_wins_on_duplicate_ids() {
    let s = state();
    let idx = SceneIndex::new(&s);
    assert_eq!(idx.object("a").map(|o| o.kind.as_str()), Some("block"));
    assert!(idx.object("zzz").is_none());
}

#[test]
fn held_set_is_union_of_property_and_relation() {
    let s = state();
    let idx = SceneIndex::new(&s);
    let held = idx.held_set(&["holding"]);
    assert!(held.contains("a"), "property alone is sufficient");
    assert!(held.contains("b"), "relation alone is sufficient");
    assert!(!held.contains("c"), "non-boolean flag is not a held signal");
}

#[test]
fn dangling_targets_are_reported_not_fatal() {
    let s = state();
    let idx = SceneIndex::new(&s);
    assert_eq!(idx.target_of("on", "c"), Some("table"));
    assert!(!idx.contains("table"));
    assert_eq!(idx.pairs_of("clear").count(), 0);
    assert_eq!(idx.relations_of("CLEAR").count(), 1);
}

#[test]
fn target_map_keeps_first_relation_per_source() {
    let s = RenderedState::new("depot")
        .relation(VisualRelation::new("at-truck", "t1", "d0"))
        .relation(VisualRelation::new("at-truck", "t1", "d1"));
    let idx = SceneIndex::new(&s);
    assert_eq!(idx.target_map("at-truck").get("t1"), Some(&"d0"));
}
