//! Scripted in-memory backend for tests.
//!
//! Records every collaborator call in order and hands out one batch of
//! scripted events per `pump_events`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::coords::Point;
use crate::core::WindowSpec;
use crate::input::Event;
use crate::paint::Color;
use crate::scheduler::{FrameControl, FrameHost};

use super::{Backend, BackendError, Canvas, EventSource};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateDisplay(String),
    CreateCanvas(u32),
    SetDrawColor(Color),
    Clear,
    DrawLine(Point, Point),
    Present,
    Pump,
    DestroyCanvas(u32),
    DestroyDisplay(u32),
    Shutdown,
    Frame,
}

type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug)]
pub(crate) struct FakeDisplay(pub u32);

#[derive(Debug)]
pub(crate) struct FakeCanvas {
    pub display: u32,
    calls: CallLog,
}

impl Canvas for FakeCanvas {
    fn set_draw_color(&mut self, color: Color) {
        self.calls.borrow_mut().push(Call::SetDrawColor(color));
    }

    fn clear(&mut self) {
        self.calls.borrow_mut().push(Call::Clear);
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.calls.borrow_mut().push(Call::DrawLine(from, to));
    }

    fn present(&mut self) {
        self.calls.borrow_mut().push(Call::Present);
    }
}

pub(crate) struct FakeBackend {
    calls: CallLog,
    batches: VecDeque<Vec<Event>>,
    queue: VecDeque<Event>,
    display_failure: Option<String>,
    canvas_failure: Option<String>,
    next_id: u32,

    /// Frames the fake host runs before giving up on its own.
    pub max_frames: usize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: Rc::default(),
            batches: VecDeque::new(),
            queue: VecDeque::new(),
            display_failure: None,
            canvas_failure: None,
            next_id: 1,
            max_frames: 1_000,
        }
    }

    /// Each inner vector is what the platform has queued at one tick.
    pub fn with_batches<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<Event>>,
    {
        let mut fake = Self::new();
        fake.batches = batches.into_iter().collect();
        fake
    }

    pub fn failing_display(mut self, detail: &str) -> Self {
        self.display_failure = Some(detail.to_string());
        self
    }

    pub fn failing_canvas(mut self, detail: &str) -> Self {
        self.canvas_failure = Some(detail.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn count_where(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn remaining_batches(&self) -> usize {
        self.batches.len()
    }

    /// Pretends the platform queued `event` outside of any pump.
    pub fn inject(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl EventSource for FakeBackend {
    fn pump_events(&mut self) {
        self.record(Call::Pump);
        if let Some(batch) = self.batches.pop_front() {
            self.queue.extend(batch);
        }
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }
}

impl Backend for FakeBackend {
    type Display = FakeDisplay;
    type Canvas = FakeCanvas;

    fn create_display(&mut self, spec: &WindowSpec) -> Result<FakeDisplay, BackendError> {
        self.record(Call::CreateDisplay(spec.title.clone()));
        if let Some(detail) = &self.display_failure {
            return Err(BackendError::new(detail.clone()));
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(FakeDisplay(id))
    }

    fn create_canvas(&mut self, display: &FakeDisplay) -> Result<FakeCanvas, BackendError> {
        self.record(Call::CreateCanvas(display.0));
        if let Some(detail) = &self.canvas_failure {
            return Err(BackendError::new(detail.clone()));
        }
        Ok(FakeCanvas {
            display: display.0,
            calls: Rc::clone(&self.calls),
        })
    }

    fn destroy_canvas(&mut self, canvas: FakeCanvas) {
        self.record(Call::DestroyCanvas(canvas.display));
    }

    fn destroy_display(&mut self, display: FakeDisplay) {
        self.record(Call::DestroyDisplay(display.0));
    }

    fn shutdown(&mut self) {
        self.record(Call::Shutdown);
    }
}

impl FrameHost for FakeBackend {
    fn run_frames(&mut self, frame: &mut dyn FnMut(&mut Self) -> FrameControl) {
        for _ in 0..self.max_frames {
            self.record(Call::Frame);
            if frame(self) == FrameControl::Cancel {
                return;
            }
        }
    }
}
