use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::platform::run_on_demand::EventLoopExtRunOnDemand;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::core::WindowSpec;
use crate::device::{Backend, BackendError, EventSource, Gpu, GpuInit, LineCanvas};
use crate::input::Event;
use crate::scheduler::{FrameControl, FrameHost};

/// Pumps allowed for the loop to become ready to create a window.
const WINDOW_READY_PUMPS: usize = 8;

/// [`Backend`] over a winit window and a wgpu [`LineCanvas`].
pub struct WinitBackend {
    /// Lent out while the loop itself is running as a frame host.
    event_loop: Option<EventLoop<()>>,
    inbox: Inbox,
    gpu_init: GpuInit,
    exited: bool,
}

/// Receives winit callbacks: queues translated events and creates the window
/// once an `ActiveEventLoop` is available.
#[derive(Default)]
struct Inbox {
    events: VecDeque<Event>,
    pending_window: Option<WindowAttributes>,
    created: Option<Result<Window, OsError>>,
}

impl Inbox {
    fn push(&mut self, event: Event) {
        log::trace!("queued {event:?}");
        self.events.push_back(event);
    }

    fn create_pending_window(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attrs) = self.pending_window.take() {
            self.created = Some(event_loop.create_window(attrs));
        }
    }
}

impl ApplicationHandler for Inbox {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending_window(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.push(translate_window_event(&event));
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending_window(event_loop);
    }
}

impl WinitBackend {
    pub fn new(gpu_init: GpuInit) -> Result<Self, BackendError> {
        let event_loop = EventLoop::new()
            .map_err(|e| BackendError::new(format!("failed to create winit EventLoop: {e}")))?;

        Ok(Self {
            event_loop: Some(event_loop),
            inbox: Inbox::default(),
            gpu_init,
            exited: false,
        })
    }

    /// Runs one non-blocking iteration of the event loop.
    ///
    /// Returns `false` once the loop has exited. While the loop is lent to
    /// `run_frames` it is already dispatching, so this does nothing.
    fn pump(&mut self) -> bool {
        if self.exited {
            return false;
        }
        let Some(event_loop) = self.event_loop.as_mut() else {
            return true;
        };

        match event_loop.pump_app_events(Some(Duration::ZERO), &mut self.inbox) {
            PumpStatus::Continue => true,
            PumpStatus::Exit(code) => {
                log::debug!("event loop exited with status {code}");
                self.exited = true;
                // The environment ended the loop; treat it as a quit request.
                self.inbox.push(Event::Quit);
                false
            }
        }
    }
}

impl EventSource for WinitBackend {
    fn pump_events(&mut self) {
        self.pump();
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.inbox.events.pop_front()
    }
}

impl Backend for WinitBackend {
    type Display = Arc<Window>;
    type Canvas = LineCanvas;

    fn create_display(&mut self, spec: &WindowSpec) -> Result<Arc<Window>, BackendError> {
        let attrs = Window::default_attributes()
            .with_title(spec.title.clone())
            .with_inner_size(LogicalSize::new(spec.width as f64, spec.height as f64))
            .with_resizable(false);

        self.inbox.pending_window = Some(attrs);
        self.inbox.created = None;

        for _ in 0..WINDOW_READY_PUMPS {
            let running = self.pump();

            if let Some(result) = self.inbox.created.take() {
                let window = result.map_err(|e| BackendError::new(e.to_string()))?;
                return Ok(Arc::new(window));
            }
            if !running {
                break;
            }
        }

        self.inbox.pending_window = None;
        Err(BackendError::new("event loop never became ready to create a window"))
    }

    fn create_canvas(&mut self, display: &Arc<Window>) -> Result<LineCanvas, BackendError> {
        let gpu = pollster::block_on(Gpu::new(Arc::clone(display), &self.gpu_init))?;
        log::debug!(
            "surface configured: {:?}, {}x{} physical",
            gpu.surface_format(),
            gpu.size().width,
            gpu.size().height
        );
        Ok(LineCanvas::new(Arc::clone(display), gpu))
    }

    fn destroy_canvas(&mut self, canvas: LineCanvas) {
        drop(canvas);
    }

    fn destroy_display(&mut self, display: Arc<Window>) {
        if Arc::strong_count(&display) > 1 {
            log::warn!("window still referenced at destroy; it closes when the last handle drops");
        }
        drop(display);
    }

    fn shutdown(&mut self) {
        self.inbox = Inbox::default();
        self.event_loop = None;
        log::debug!("windowing backend shut down");
    }
}

impl FrameHost for WinitBackend {
    fn run_frames(&mut self, frame: &mut dyn FnMut(&mut Self) -> FrameControl) {
        if self.exited {
            return;
        }
        let Some(mut event_loop) = self.event_loop.take() else {
            log::warn!("event loop is not available; no frames will run");
            return;
        };

        let mut host = HostFrames {
            backend: &mut *self,
            frame,
            cancelled: false,
        };
        let result = event_loop.run_app_on_demand(&mut host);
        let cancelled = host.cancelled;

        if let Err(err) = result {
            log::error!("winit event loop terminated with error: {err}");
        }
        if !cancelled {
            self.exited = true;
        }
        self.event_loop = Some(event_loop);
    }
}

/// Frame scheduling on the event loop's own run: once per loop iteration,
/// after pending events have been queued.
struct HostFrames<'b, 'f> {
    backend: &'b mut WinitBackend,
    frame: &'f mut dyn FnMut(&mut WinitBackend) -> FrameControl,
    cancelled: bool,
}

impl ApplicationHandler for HostFrames<'_, '_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.backend.inbox.create_pending_window(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if !self.cancelled {
            self.backend.inbox.push(translate_window_event(&event));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.cancelled {
            return;
        }

        // Sleep until the next event; the frame is static.
        event_loop.set_control_flow(ControlFlow::Wait);

        if (self.frame)(&mut *self.backend) == FrameControl::Cancel {
            self.cancelled = true;
            event_loop.exit();
        }
    }
}

/// Only a close request means quit; everything else is reported by kind.
fn translate_window_event(event: &WindowEvent) -> Event {
    match event {
        WindowEvent::CloseRequested => Event::Quit,
        WindowEvent::Destroyed => Event::other("destroyed"),
        WindowEvent::RedrawRequested => Event::other("redraw-requested"),
        WindowEvent::Resized(_) => Event::other("resized"),
        WindowEvent::Moved(_) => Event::other("moved"),
        WindowEvent::Focused(_) => Event::other("focused"),
        WindowEvent::Occluded(_) => Event::other("occluded"),
        WindowEvent::ScaleFactorChanged { .. } => Event::other("scale-factor-changed"),
        WindowEvent::KeyboardInput { .. } => Event::other("keyboard-input"),
        WindowEvent::ModifiersChanged(_) => Event::other("modifiers-changed"),
        WindowEvent::CursorMoved { .. } => Event::other("cursor-moved"),
        WindowEvent::CursorEntered { .. } => Event::other("cursor-entered"),
        WindowEvent::CursorLeft { .. } => Event::other("cursor-left"),
        WindowEvent::MouseInput { .. } => Event::other("mouse-input"),
        WindowEvent::MouseWheel { .. } => Event::other("mouse-wheel"),
        _ => Event::other("window"),
    }
}
