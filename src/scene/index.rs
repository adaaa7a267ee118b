use std::collections::{BTreeSet, HashMap};

use crate::scene::model::{RenderedState, VisualObject, VisualRelation};

/// Relation tags that mark their target as held by a gripper-like object.
pub const HOLD_RELATIONS: [&str; 3] = ["holding", "carry", "grasping"];

/// Per-frame lookup tables over one [`RenderedState`].
///
/// Built fresh for every frame; lookups of unknown ids return `None` and callers omit the
/// corresponding visual element.
#[derive(Debug)]
pub struct SceneIndex<'a> {
    state: &'a RenderedState,
    by_id: HashMap<&'a str, &'a VisualObject>,
}

impl<'a> SceneIndex<'a> {
    /// Index `state`. When ids repeat, the first object wins.
    pub fn new(state: &'a RenderedState) -> Self {
        let mut by_id = HashMap::with_capacity(state.objects.len());
        for obj in &state.objects {
            by_id.entry(obj.id.as_str()).or_insert(obj);
        }
        Self { state, by_id }
    }

    /// The indexed state.
    pub fn state(&self) -> &'a RenderedState {
        self.state
    }

    /// Object by id.
    pub fn object(&self, id: &str) -> Option<&'a VisualObject> {
        self.by_id.get(id).copied()
    }

    /// Return `true` when `id` names an object in this state.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Objects whose type tag equals `kind`, in state order.
    pub fn objects_of<'s>(&'s self, kind: &'s str) -> impl Iterator<Item = &'a VisualObject> + 's {
        let state = self.state;
        state
            .objects
            .iter()
            .filter(move |o| o.kind.eq_ignore_ascii_case(kind))
    }

    /// Relations tagged `kind`, in state order.
    pub fn relations_of<'s>(
        &'s self,
        kind: &'s str,
    ) -> impl Iterator<Item = &'a VisualRelation> + 's {
        let state = self.state;
        state.relations.iter().filter(move |r| r.is(kind))
    }

    /// `(source, target)` pairs of binary relations tagged `kind`, in state order.
    pub fn pairs_of<'s>(&'s self, kind: &'s str) -> impl Iterator<Item = (&'a str, &'a str)> + 's {
        self.relations_of(kind)
            .filter_map(|r| Some((r.source.as_str(), r.target.as_deref()?)))
    }

    /// First target of a `kind` relation whose source is `source` (e.g. truck -> location).
    pub fn target_of(&self, kind: &str, source: &str) -> Option<&'a str> {
        self.pairs_of(kind)
            .find(|(s, _)| *s == source)
            .map(|(_, t)| t)
    }

    /// Source -> first target map for relations tagged `kind`.
    pub fn target_map(&self, kind: &str) -> HashMap<&'a str, &'a str> {
        let mut out = HashMap::new();
        for (s, t) in self.pairs_of(kind) {
            out.entry(s).or_insert(t);
        }
        out
    }

    /// Ids of objects considered held.
    ///
    /// An id is held when its own `held` property is `true` OR some relation in `hold_kinds`
    /// targets it. Either signal alone is sufficient.
    pub fn held_set(&self, hold_kinds: &[&str]) -> BTreeSet<&'a str> {
        let state = self.state;
        let mut held = BTreeSet::new();
        for obj in &state.objects {
            if obj.props().flag("held") {
                held.insert(obj.id.as_str());
            }
        }
        for rel in &state.relations {
            if !hold_kinds.iter().any(|k| rel.is(k)) {
                continue;
            }
            if let Some(target) = rel.target.as_deref() {
                held.insert(target);
            }
        }
        held
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/index.rs"]
mod tests;
