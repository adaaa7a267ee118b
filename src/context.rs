use std::sync::Arc;

use crate::assets::store::AssetManager;
use crate::config::RenderConfig;
use crate::dispatch::Dispatcher;
use crate::effects::Clock;
use crate::foundation::error::PlanvizResult;
use crate::render::frame;
use crate::render::surface::Surface;
use crate::scene::model::RenderedState;
use crate::viewport::Viewport;

/// One independent renderer instance.
///
/// Owns everything that survives between frames: configuration, the pan/zoom viewport, the
/// asset cache and the dispatcher with its effect timers. Two contexts never share state.
#[derive(Debug)]
pub struct RendererContext {
    config: RenderConfig,
    viewport: Viewport,
    assets: AssetManager,
    dispatcher: Dispatcher,
}

impl RendererContext {
    /// Validate `config` and build a context. Assets are not loaded yet.
    pub fn new(config: RenderConfig) -> PlanvizResult<Self> {
        config.validate()?;
        Ok(Self {
            viewport: Viewport::new(config.viewport),
            assets: AssetManager::new(config.assets.resolved_dir()),
            dispatcher: Dispatcher::default(),
            config,
        })
    }

    /// Replace the time source used by transient effects.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.dispatcher = Dispatcher::new(clock);
        self
    }

    /// Replace the asset manager.
    pub fn with_assets(mut self, assets: AssetManager) -> Self {
        self.assets = assets;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport, for pan and zoom.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Asset cache.
    pub fn assets(&self) -> &AssetManager {
        &self.assets
    }

    /// Dispatcher and its effect state.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Draw one frame of `state` onto `surface`.
    pub fn render(&mut self, state: &RenderedState, surface: &mut dyn Surface) {
        frame::render_frame(
            state,
            surface,
            &self.config,
            &self.viewport,
            &self.assets,
            &mut self.dispatcher,
        );
    }
}

#[cfg(test)]
#[path = "../tests/unit/context.rs"]
mod tests;
