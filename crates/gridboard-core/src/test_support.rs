//! Shared fixtures for unit tests.

use crate::capture::PointerCapture;
use crate::drag::{DragEvent, DragHandler};
use crate::layout::{GridPosition, GridSize};
use crate::resize::{ResizeDirection, ResizeEvent, ResizeHandler, ResizeLine};
use crate::timer::Duration;
use std::cell::Cell;

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counts attach/detach calls.
#[derive(Debug, Default)]
pub struct CountingCapture {
    attached: Cell<usize>,
    detached: Cell<usize>,
}

impl CountingCapture {
    pub fn attached(&self) -> usize {
        self.attached.get()
    }

    pub fn detached(&self) -> usize {
        self.detached.get()
    }

    /// Listener sets currently attached.
    pub fn active(&self) -> usize {
        self.attached().saturating_sub(self.detached())
    }
}

impl PointerCapture for CountingCapture {
    fn attach(&self) {
        self.attached.set(self.attached.get() + 1);
    }

    fn detach(&self) {
        self.detached.set(self.detached.get() + 1);
    }
}

/// Records drag and resize callbacks separately.
#[derive(Debug, Default)]
pub struct Recorder {
    pub drag: Vec<DragEvent>,
    pub resize: Vec<ResizeEvent>,
}

impl DragHandler for Recorder {
    fn on_drag_start(&mut self, origin: GridPosition) {
        self.drag.on_drag_start(origin);
    }

    fn on_drag(&mut self, candidate: GridPosition) {
        self.drag.on_drag(candidate);
    }

    fn on_drag_end(&mut self, origin: GridPosition) {
        self.drag.on_drag_end(origin);
    }
}

impl ResizeHandler for Recorder {
    fn on_resize_start(&mut self, direction: ResizeDirection, size: GridSize) {
        self.resize.on_resize_start(direction, size);
    }

    fn on_resize(&mut self, size: GridSize) {
        self.resize.on_resize(size);
    }

    fn on_resize_move(&mut self, line: ResizeLine) {
        self.resize.on_resize_move(line);
    }

    fn on_resize_end(&mut self, size: GridSize) {
        self.resize.on_resize_end(size);
    }
}
