use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Point;
use crate::foundation::error::{PlanvizError, PlanvizResult};
use crate::scene::props::Props;

/// Open, string-keyed attribute bag carried by objects and relations.
pub type PropertyMap = BTreeMap<String, serde_json::Value>;

/// One drawable symbolic object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualObject {
    /// Identifier, unique within one state.
    pub id: String,
    /// Type tag such as `"block"`, `"truck"` or `"robot"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display string. Defaults to the id when the producer omits it.
    #[serde(default)]
    pub label: String,
    /// Literal anchor point. Its meaning (corner or centre) is documented per strategy.
    #[serde(
        default,
        deserialize_with = "deserialize_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<Point>,
    /// Free-form attributes (dimensions, colour, flags like `held` or `clear`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,
}

impl VisualObject {
    /// Object with no position and no properties.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind: kind.into(),
            position: None,
            properties: PropertyMap::new(),
        }
    }

    /// Builder: set the literal position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    /// Builder: set the display label.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder: set one property.
    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Typed view over [`VisualObject::properties`].
    pub fn props(&self) -> Props<'_> {
        Props::new(&self.properties)
    }

    /// Label to draw; falls back to the id when the label is empty.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// Directed edge between object ids. Endpoints may dangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualRelation {
    /// Relation tag such as `"on"`, `"holding"` or `"connected"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Source object id.
    pub source: String,
    /// Target object id, absent for unary relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Optional styling hints (`color`, `dashed`, `label`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,
}

impl VisualRelation {
    /// Binary relation `kind(source, target)`.
    pub fn new(
        kind: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            source: source.into(),
            target: Some(target.into()),
            properties: PropertyMap::new(),
        }
    }

    /// Unary relation `kind(source)`.
    pub fn unary(kind: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            source: source.into(),
            target: None,
            properties: PropertyMap::new(),
        }
    }

    /// Return `true` when the relation tag matches `kind` (ASCII case-insensitive).
    pub fn is(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }

    /// Typed view over [`VisualRelation::properties`].
    pub fn props(&self) -> Props<'_> {
        Props::new(&self.properties)
    }
}

/// One immutable planning state ready to be drawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderedState {
    /// Domain tag selecting a strategy.
    #[serde(default)]
    pub domain: String,
    /// Objects; order drives default z-order and legend order.
    #[serde(default)]
    pub objects: Vec<VisualObject>,
    /// Relations in producer order.
    #[serde(default)]
    pub relations: Vec<VisualRelation>,
    /// Free-form metadata (`step`, `action`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: PropertyMap,
}

impl RenderedState {
    /// Empty state for `domain`.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Builder: append an object.
    pub fn object(mut self, obj: VisualObject) -> Self {
        self.objects.push(obj);
        self
    }

    /// Builder: append a relation.
    pub fn relation(mut self, rel: VisualRelation) -> Self {
        self.relations.push(rel);
        self
    }

    /// Builder: set the action that produced this state.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.metadata
            .insert("action".to_string(), serde_json::Value::String(action.into()));
        self
    }

    /// Name of the action that produced this state, if recorded.
    pub fn action(&self) -> Option<&str> {
        self.metadata.get("action").and_then(serde_json::Value::as_str)
    }

    /// Step number within the plan trace, if recorded.
    pub fn step(&self) -> Option<u64> {
        self.metadata.get("step").and_then(serde_json::Value::as_u64)
    }
}

/// Ordered sequence of states produced by the planning layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlanTrace {
    /// Domain name reported by the producer, if any.
    pub domain: Option<String>,
    /// Problem name reported by the producer, if any.
    pub problem: Option<String>,
    /// The plan's action list, if reported.
    pub plan: Vec<String>,
    /// States in plan order.
    pub states: Vec<RenderedState>,
}

impl PlanTrace {
    /// Wrap an already-built list of states.
    pub fn from_states(states: Vec<RenderedState>) -> Self {
        Self {
            states,
            ..Self::default()
        }
    }

    /// Parse either a bare JSON array of states or the producer's envelope object.
    ///
    /// States that carry no domain inherit the envelope's domain.
    pub fn from_json_str(s: &str) -> PlanvizResult<Self> {
        let trace: Self = serde_json::from_str(s)?;
        Ok(trace)
    }

    /// Read and parse a trace file.
    pub fn from_json_file(path: &Path) -> PlanvizResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read plan trace '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Return `true` when the trace has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State at `index`.
    pub fn get(&self, index: usize) -> PlanvizResult<&RenderedState> {
        self.states.get(index).ok_or_else(|| {
            PlanvizError::validation(format!(
                "state index {index} out of range (trace has {} states)",
                self.states.len()
            ))
        })
    }
}

impl<'de> Deserialize<'de> for PlanTrace {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            domain: Option<String>,
            #[serde(default)]
            problem: Option<String>,
            #[serde(default)]
            plan: Vec<String>,
            states: Vec<RenderedState>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(Vec<RenderedState>),
            Envelope(Envelope),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Bare(states) => Ok(Self::from_states(states)),
            Repr::Envelope(env) => {
                let mut states = env.states;
                if let Some(domain) = env.domain.as_deref() {
                    for s in states.iter_mut().filter(|s| s.domain.is_empty()) {
                        s.domain = domain.to_string();
                    }
                }
                Ok(Self {
                    domain: env.domain,
                    problem: env.problem,
                    plan: env.plan,
                    states,
                })
            }
        }
    }
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<Option<Point>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Arr(Vec<f64>),
        Obj { x: f64, y: f64 },
        Other(serde_json::Value),
    }

    let pos = match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Arr(v)) if v.len() >= 2 => Some(Point::new(v[0], v[1])),
        Some(Repr::Obj { x, y }) => Some(Point::new(x, y)),
        _ => None,
    };
    Ok(pos.filter(|p| p.x.is_finite() && p.y.is_finite()))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
