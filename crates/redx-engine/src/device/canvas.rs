use std::sync::Arc;

use winit::window::Window;

use crate::coords::{Point, Viewport};
use crate::paint::Color;
use crate::render::{LineBatch, LineRenderer};

use super::{Canvas, Gpu, GpuFrame, SurfaceErrorAction};

/// Drawing surface built on a window's wgpu surface.
///
/// Draw calls are recorded into a [`LineBatch`]; `present` replays the batch on
/// top of the last clear color in one render pass.
pub struct LineCanvas {
    window: Arc<Window>,
    gpu: Gpu,
    renderer: LineRenderer,
    viewport: Viewport,

    draw_color: Color,
    background: Color,
    batch: LineBatch,
}

impl LineCanvas {
    pub fn new(window: Arc<Window>, gpu: Gpu) -> Self {
        // Callers address logical pixels (the size the window was requested
        // with); the batch rasterizes them onto the physical surface.
        let size = gpu.size();
        let scale = window.scale_factor();

        Self {
            window,
            gpu,
            renderer: LineRenderer::new(),
            viewport: Viewport::new(size.width as f32, size.height as f32),
            draw_color: Color::BLACK,
            background: Color::BLACK,
            batch: LineBatch::with_scale(scale),
        }
    }

    fn draw_frame(&mut self, mut frame: GpuFrame) {
        self.renderer.render(
            &self.gpu,
            &mut frame,
            self.viewport,
            self.background,
            &self.batch,
        );

        self.window.pre_present_notify();
        self.gpu.submit(frame);
    }
}

impl Canvas for LineCanvas {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.background = self.draw_color;
        self.batch.clear();
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.batch.push(from, to, self.draw_color);
    }

    fn present(&mut self) {
        // One retry after a reconfigure; anything else drops the frame.
        for attempt in 0..2 {
            let err = match self.gpu.begin_frame() {
                Ok(frame) => {
                    self.draw_frame(frame);
                    log::debug!("frame presented ({} segments)", self.batch.len());
                    return;
                }
                Err(err) => err,
            };

            match self.gpu.handle_surface_error(&err) {
                SurfaceErrorAction::Reconfigured if attempt == 0 => {
                    log::debug!("surface reconfigured after `{err}`; retrying present");
                }
                action => {
                    log::warn!("frame dropped: {err} ({action:?})");
                    return;
                }
            }
        }
    }
}
