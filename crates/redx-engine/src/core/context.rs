use crate::device::{Backend, Canvas};
use crate::paint::Color;
use crate::render::CrossShape;

use super::{InitError, WindowSpec};

/// Display surface + drawing surface pair.
///
/// The drawing surface is only ever present while the display surface is.
/// [`GraphicsContext::teardown`] is the ordered release path; dropping a live
/// context without it leaves release order to the handles' own `Drop`.
pub struct GraphicsContext<D, C> {
    display: Option<D>,
    canvas: Option<C>,
    width: u32,
    height: u32,
}

impl<D, C> Default for GraphicsContext<D, C> {
    fn default() -> Self {
        Self {
            display: None,
            canvas: None,
            width: 0,
            height: 0,
        }
    }
}

impl<D, C: Canvas> GraphicsContext<D, C> {
    /// Acquires the display surface, then the drawing surface bound to it.
    ///
    /// If the drawing surface fails, the display surface is released before
    /// returning.
    pub fn initialize<B>(backend: &mut B, spec: &WindowSpec) -> Result<Self, InitError>
    where
        B: Backend<Display = D, Canvas = C> + ?Sized,
    {
        let display = backend
            .create_display(spec)
            .map_err(InitError::DisplaySurface)?;
        log::info!("window created ({}x{}, \"{}\")", spec.width, spec.height, spec.title);

        let canvas = match backend.create_canvas(&display) {
            Ok(canvas) => canvas,
            Err(err) => {
                log::debug!("renderer creation failed; releasing window");
                backend.destroy_display(display);
                return Err(InitError::DrawingSurface(err));
            }
        };
        log::info!("renderer created");

        Ok(Self {
            display: Some(display),
            canvas: Some(canvas),
            width: spec.width,
            height: spec.height,
        })
    }

    /// Whether both surfaces are held.
    pub fn is_live(&self) -> bool {
        self.display.is_some() && self.canvas.is_some()
    }

    /// Clears to black, draws the red X, presents. Called once per run.
    pub fn render_fixed_shape(&mut self, thickness: u32) {
        let Some(canvas) = self.canvas.as_mut() else {
            log::warn!("render skipped: no drawing surface");
            return;
        };

        let shape = CrossShape::new(self.width, self.height, thickness);

        canvas.set_draw_color(Color::BLACK);
        canvas.clear();

        canvas.set_draw_color(Color::RED);
        for seg in shape.segments() {
            canvas.draw_line(seg.from, seg.to);
        }

        canvas.present();
    }

    /// Releases the drawing surface, then the display surface.
    ///
    /// Handles already released (or never acquired) are skipped, so calling
    /// this repeatedly is harmless.
    pub fn teardown<B>(&mut self, backend: &mut B)
    where
        B: Backend<Display = D, Canvas = C> + ?Sized,
    {
        if let Some(canvas) = self.canvas.take() {
            backend.destroy_canvas(canvas);
            log::debug!("renderer destroyed");
        }
        if let Some(display) = self.display.take() {
            backend.destroy_display(display);
            log::debug!("window destroyed");
        }
    }
}
