//! Shared test doubles: a recording surface and a hand-cranked clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;

use crate::engine::Clock;
use crate::render::{LineCap, Surface};

/// Everything the engine asked a surface to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(String),
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
        alpha: f32,
    },
    Square {
        corner: Vec2,
        size: f32,
        color: String,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: LineCap,
        color: String,
        alpha: f32,
    },
}

/// A fake drawable surface with shared, test-settable state. Clones share
/// state, so tests keep one clone and hand the other to the engine.
#[derive(Clone)]
pub struct MockSurface {
    attached: Rc<Cell<bool>>,
    visible: Rc<Cell<bool>>,
    client: Rc<Cell<(u32, u32)>>,
    pixel: Rc<Cell<(u32, u32)>>,
    pixel_ratio: Rc<Cell<f64>>,
    resizes: Rc<Cell<u32>>,
    calls: Rc<RefCell<Vec<DrawCall>>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self {
            attached: Rc::new(Cell::new(true)),
            visible: Rc::new(Cell::new(true)),
            client: Rc::new(Cell::new((800, 600))),
            pixel: Rc::new(Cell::new((1, 1))),
            pixel_ratio: Rc::new(Cell::new(1.0)),
            resizes: Rc::new(Cell::new(0)),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn set_client_size(&self, width: u32, height: u32) {
        self.client.set((width, height));
    }

    pub fn set_pixel_ratio(&self, ratio: f64) {
        self.pixel_ratio.set(ratio);
    }

    pub fn pixel_size_value(&self) -> (u32, u32) {
        self.pixel.get()
    }

    pub fn resize_count(&self) -> u32 {
        self.resizes.get()
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }
}

impl Surface for MockSurface {
    fn attached(&self) -> bool {
        self.attached.get()
    }

    fn visible(&self) -> bool {
        self.visible.get()
    }

    fn client_size(&self) -> (u32, u32) {
        self.client.get()
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio.get()
    }

    fn pixel_size(&self) -> (u32, u32) {
        self.pixel.get()
    }

    fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.pixel.set((width, height));
        self.resizes.set(self.resizes.get() + 1);
    }

    fn clear(&mut self, color: &str) {
        self.calls.borrow_mut().push(DrawCall::Clear(color.to_string()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32) {
        self.calls.borrow_mut().push(DrawCall::Circle {
            center,
            radius,
            color: color.to_string(),
            alpha,
        });
    }

    fn fill_square(&mut self, corner: Vec2, size: f32, color: &str, alpha: f32) {
        self.calls.borrow_mut().push(DrawCall::Square {
            corner,
            size,
            color: color.to_string(),
            alpha,
        });
    }

    fn stroke_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: LineCap,
        color: &str,
        alpha: f32,
    ) {
        self.calls.borrow_mut().push(DrawCall::Line {
            from,
            to,
            width,
            cap,
            color: color.to_string(),
            alpha,
        });
    }
}

/// A clock whose time only moves when the test says so.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(0.0)))
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}
