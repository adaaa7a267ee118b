use std::path::Path;

use crate::context::RendererContext;
use crate::foundation::error::PlanvizResult;
use crate::render::ops::{DrawCmd, Recorder};
use crate::render::raster::{RasterFrame, RasterOptions, rasterize_svg};
use crate::render::surface::Surface;
use crate::render::svg::SvgSurface;
use crate::scene::model::PlanTrace;

/// A plan trace bound to a renderer context.
#[derive(Debug)]
pub struct RenderSession {
    trace: PlanTrace,
    context: RendererContext,
    raster: RasterOptions,
}

impl RenderSession {
    /// Bind `trace` to `context`.
    pub fn new(trace: PlanTrace, context: RendererContext) -> Self {
        let raster = RasterOptions {
            resources_dir: context.assets().root().map(Path::to_path_buf),
            font_dir: None,
        };
        Self {
            trace,
            context,
            raster,
        }
    }

    /// Builder: extra font directory for rasterization.
    pub fn with_font_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.raster.font_dir = Some(dir.into());
        self
    }

    /// The trace.
    pub fn trace(&self) -> &PlanTrace {
        &self.trace
    }

    /// The renderer context.
    pub fn context(&self) -> &RendererContext {
        &self.context
    }

    /// Mutable renderer context, for viewport changes between frames.
    pub fn context_mut(&mut self) -> &mut RendererContext {
        &mut self.context
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Return `true` when the trace has no states.
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Draw state `index` onto `surface`.
    pub fn render_to(&mut self, index: usize, surface: &mut dyn Surface) -> PlanvizResult<()> {
        let state = self.trace.get(index)?;
        self.context.render(state, surface);
        Ok(())
    }

    /// Recorded draw commands for state `index`.
    pub fn draw_commands(&mut self, index: usize) -> PlanvizResult<Vec<DrawCmd>> {
        let mut rec = Recorder::new(self.context.config().canvas.size());
        self.render_to(index, &mut rec)?;
        Ok(rec.into_commands())
    }

    /// State `index` as a standalone SVG document.
    pub fn render_svg(&mut self, index: usize) -> PlanvizResult<String> {
        let mut svg = SvgSurface::new(self.context.config().canvas.size());
        self.render_to(index, &mut svg)?;
        Ok(svg.finish())
    }

    /// State `index` rasterized to pixels.
    pub fn render_raster(&mut self, index: usize) -> PlanvizResult<RasterFrame> {
        let svg = self.render_svg(index)?;
        rasterize_svg(&svg, &self.raster)
    }

    /// State `index` written as a PNG file.
    pub fn render_png(&mut self, index: usize, path: &Path) -> PlanvizResult<()> {
        self.render_raster(index)?.write_png(path)
    }
}

/// Step-through cursor over a trace of `len` states. Moves are clamped to the valid range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playback {
    len: usize,
    index: usize,
}

impl Playback {
    /// Cursor at the first state.
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Current state index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Jump to state `n`, clamped. Returns the new index.
    pub fn show(&mut self, n: usize) -> usize {
        self.index = n.min(self.len.saturating_sub(1));
        self.index
    }

    /// Advance one state. Returns `false` when already at the end.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 < self.len {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one state. Returns `false` when already at the start.
    pub fn back(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to the first state.
    pub fn first(&mut self) -> usize {
        self.show(0)
    }

    /// Jump to the last state.
    pub fn last(&mut self) -> usize {
        self.show(usize::MAX)
    }

    /// Whether the cursor is on the final state.
    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.len
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
