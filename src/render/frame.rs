use crate::assets::store::AssetManager;
use crate::config::RenderConfig;
use crate::dispatch::Dispatcher;
use crate::domains::DrawCtx;
use crate::render::surface::Surface;
use crate::scene::model::RenderedState;
use crate::viewport::Viewport;

/// Clear, apply the viewport, let the dispatcher draw, restore.
///
/// Never fails: missing geometry, dangling relations and unloaded assets only change what is
/// drawn.
#[tracing::instrument(skip_all, fields(domain = %state.domain, objects = state.objects.len()))]
pub fn render_frame(
    state: &RenderedState,
    surface: &mut dyn Surface,
    config: &RenderConfig,
    viewport: &Viewport,
    assets: &AssetManager,
    dispatcher: &mut Dispatcher,
) {
    surface.clear(config.background);
    surface.save();
    surface.transform(viewport.transform());
    let view = viewport.visible_size(surface.size());
    let mut cx = DrawCtx {
        surface: &mut *surface,
        assets,
        config,
        view,
    };
    dispatcher.draw(state, &mut cx);
    surface.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
