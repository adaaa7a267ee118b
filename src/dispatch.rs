use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::domains::{self, DrawCtx};
use crate::effects::{CameraFlash, Clock, SystemClock};
use crate::scene::model::RenderedState;

/// The closed set of strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    /// Block stacking.
    BlocksWorld,
    /// Two-armed robot and balls.
    Gripper,
    /// Trucks and packages on a grid.
    Depot,
    /// Tower of Hanoi.
    Hanoi,
    /// Rovers on waypoints.
    Rovers,
    /// Inferred shapes and legend for everything else.
    Generic,
}

impl Domain {
    /// Canonical tag.
    pub fn tag(self) -> &'static str {
        match self {
            Domain::BlocksWorld => "blocks-world",
            Domain::Gripper => "gripper",
            Domain::Depot => "depot",
            Domain::Hanoi => "hanoi",
            Domain::Rovers => "rovers",
            Domain::Generic => "generic",
        }
    }
}

/// Registered tag. Matching is ASCII case-insensitive after trimming.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Tag as written by producers.
    pub tag: &'static str,
    /// Strategy it selects.
    pub domain: Domain,
    /// `true` for the canonical tag, `false` for aliases.
    pub canonical: bool,
}

const fn canonical(tag: &'static str, domain: Domain) -> Registration {
    Registration {
        tag,
        domain,
        canonical: true,
    }
}

const fn alias(tag: &'static str, domain: Domain) -> Registration {
    Registration {
        tag,
        domain,
        canonical: false,
    }
}

const REGISTRY: [Registration; 10] = [
    canonical("blocks-world", Domain::BlocksWorld),
    alias("blocksworld", Domain::BlocksWorld),
    alias("blocks", Domain::BlocksWorld),
    canonical("gripper", Domain::Gripper),
    canonical("depot", Domain::Depot),
    alias("depots", Domain::Depot),
    canonical("hanoi", Domain::Hanoi),
    alias("towers-of-hanoi", Domain::Hanoi),
    canonical("rovers", Domain::Rovers),
    alias("rover", Domain::Rovers),
];

/// Every registered tag, canonical tags and aliases alike.
pub fn registry() -> &'static [Registration] {
    &REGISTRY
}

/// Strategy for a domain tag; unknown tags select [`Domain::Generic`].
pub fn resolve(tag: &str) -> Domain {
    let tag = tag.trim();
    REGISTRY
        .iter()
        .find(|r| r.tag.eq_ignore_ascii_case(tag))
        .map(|r| r.domain)
        .unwrap_or(Domain::Generic)
}

/// Routes states to strategies and owns the cross-frame effect state.
#[derive(Debug)]
pub struct Dispatcher {
    clock: Arc<dyn Clock>,
    flash: CameraFlash,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::default()))
    }
}

impl Dispatcher {
    /// Dispatcher reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            flash: CameraFlash::default(),
        }
    }

    /// Current camera-flash timer.
    pub fn camera_flash(&self) -> &CameraFlash {
        &self.flash
    }

    /// Drop effect state, e.g. when a new trace is loaded.
    pub fn reset_effects(&mut self) {
        self.flash.reset();
    }

    /// Draw `state` with the strategy its domain tag selects.
    pub fn draw(&mut self, state: &RenderedState, cx: &mut DrawCtx<'_>) {
        let domain = resolve(&state.domain);
        if domain == Domain::Generic {
            tracing::debug!(tag = %state.domain, "no dedicated strategy, using generic");
        }
        match domain {
            Domain::BlocksWorld => domains::blocks::render(state, cx),
            Domain::Gripper => domains::gripper::render(state, cx),
            Domain::Depot => domains::depot::render(state, cx),
            Domain::Hanoi => domains::hanoi::render(state, cx),
            Domain::Rovers => {
                let effects = &cx.config.effects;
                let visible = self.flash.observe(
                    state.action(),
                    self.clock.now(),
                    &effects.capture_marker,
                    Duration::from_millis(effects.camera_flash_ms),
                );
                domains::rovers::render(state, cx, visible);
            }
            Domain::Generic => domains::generic::render(state, cx),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/dispatch.rs"]
mod tests;
