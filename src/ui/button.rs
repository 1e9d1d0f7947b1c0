use super::*;
use crate::session::Move;

/// Latest pointer state reported by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
    pub buttons: u8,
}

impl Pointer {
    pub fn primary(&self) -> bool {
        self.buttons & 1 != 0
    }
    pub fn within(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }
}

/// A move button. A click is a primary press that started on the button
/// followed by a release while still hovering it.
#[derive(Debug, Clone)]
pub struct Button {
    rect: Rect,
    choice: Move,
    armed: bool,
    held: bool,
}

impl Button {
    pub fn new(rect: Rect, choice: Move) -> Self {
        Self {
            rect,
            choice,
            armed: false,
            held: false,
        }
    }
    pub fn rect(&self) -> Rect {
        self.rect
    }
    /// Feeds a pointer event. Returns the move if this completes a click.
    pub fn update(&mut self, pointer: &Pointer) -> Option<Move> {
        let hovering = pointer.within(&self.rect);
        let pressed = pointer.primary() && !self.held;
        self.held = pointer.primary();
        match (self.armed, pointer.primary()) {
            (true, false) => {
                self.armed = false;
                hovering.then_some(self.choice)
            }
            (false, true) if hovering && pressed => {
                self.armed = true;
                None
            }
            _ => None,
        }
    }
    pub fn reset(&mut self) {
        self.armed = false;
    }
    pub fn draw(&self, canvas: &mut Canvas, pointer: &Pointer) {
        let fill = match (pointer.within(&self.rect), pointer.primary()) {
            (true, true) => Rgb::BLACK,
            (true, false) => Rgb::PRIMARY_LIGHT,
            (false, _) => Rgb::PRIMARY,
        };
        canvas.fill(self.rect, fill);
        canvas.caption(self.rect, &self.choice.to_string().to_lowercase(), Rgb::WHITE);
    }
}
