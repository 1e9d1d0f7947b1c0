use super::*;
use crate::RANKINGS_SPLIT_X;
use crate::UI_HEIGHT;
use crate::UI_WIDTH;
use crate::session::*;
use std::sync::Arc;

const W: i32 = UI_WIDTH as i32;
const H: i32 = UI_HEIGHT as i32;

/// One connection's seat at the tournament.
/// Joins on construction and leaves on drop, so however the connection
/// ends the session hears about it exactly once.
pub struct Screen {
    session: Arc<Session>,
    handle: PlayerHandle,
    pointer: Pointer,
    buttons: [Button; 3],
}

impl Screen {
    pub fn enter(session: Arc<Session>) -> Self {
        let handle = session.join_anonymous();
        Self {
            session,
            handle,
            pointer: Pointer::default(),
            buttons: Move::all().map(|choice| {
                let x0 = 8 + 77 * choice as i32;
                Button::new(Rect::new(x0, 32, x0 + 69, 64), choice)
            }),
        }
    }
    pub fn handle(&self) -> PlayerHandle {
        self.handle
    }
    /// Tracks the pointer and submits a move when a visible button is clicked.
    pub fn pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
        let choosing = self
            .session
            .view(self.handle)
            .is_ok_and(|view| view.phase == Phase::Picking && view.opponent.is_some());
        let clicked = self
            .buttons
            .iter_mut()
            .filter_map(|b| b.update(&pointer))
            .last();
        if !choosing {
            self.buttons.iter_mut().for_each(Button::reset);
            return;
        }
        if let Some(choice) = clicked {
            self.session
                .submit(self.handle, choice)
                .inspect_err(|e| log::debug!("[ui] submit failed: {}", e))
                .ok();
        }
    }
    /// Renders the requested region of the framebuffer.
    pub fn render(&self, area: Rect) -> Canvas {
        let mut canvas = Canvas::new(area, Rgb::WHITE);
        match self.session.view(self.handle) {
            Ok(view) => {
                self.draw(&mut canvas, &view);
                self.rankings(&mut canvas, &view);
            }
            Err(e) => log::debug!("[ui] blank frame: {}", e),
        }
        canvas
    }
}

impl Screen {
    fn draw(&self, canvas: &mut Canvas, view: &PlayerView) {
        match view.phase {
            Phase::Waiting => {
                canvas.label(Rect::new(8, 8, W - 8, 24), "Waiting for other players...", Rgb::BLACK)
            }
            Phase::Picking => self.picking(canvas, view),
            Phase::Review => self.review(canvas, view),
        }
    }
    fn picking(&self, canvas: &mut Canvas, view: &PlayerView) {
        canvas.fill(Rect::new(0, 0, RANKINGS_SPLIT_X, H), Rgb::YELLOW);
        match view.opponent.as_ref() {
            None => {
                canvas.label(Rect::new(8, 8, W - 8, 24), "YOU MUST SIT OUT THIS ROUND", Rgb::BLACK);
                canvas.label(
                    Rect::new(8, 32, W - 8, 40),
                    "(must be an odd number of players)",
                    Rgb::BLACK,
                );
            }
            Some(opponent) => {
                canvas.label(Rect::new(8, 8, W - 8, 24), "CHOOSE YOUR WEAPON", Rgb::BLACK);
                self.buttons
                    .iter()
                    .for_each(|b| b.draw(canvas, &self.pointer));
                canvas.label(
                    Rect::new(8, 200, W - 8, 216),
                    &format!("WHAT WILL {} CHOOSE?", opponent.name()),
                    Rgb::BLACK,
                );
            }
        }
        canvas.label(
            Rect::new(8, 72, W - 8, 88),
            &format!("{:.1}s left...", view.time_left.as_secs_f32()),
            Rgb::BLACK,
        );
    }
    fn review(&self, canvas: &mut Canvas, view: &PlayerView) {
        let column = RANKINGS_SPLIT_X - 8;
        let Some(opponent) = view.opponent.as_ref() else {
            canvas.label(Rect::new(8, 8, column, 24), "Wait for it...", Rgb::BLACK);
            return;
        };
        let mine = view
            .own_move
            .map_or_else(|| "none".to_string(), |m| m.to_string());
        let theirs = view
            .opponent_move
            .map_or_else(|| "none".to_string(), |m| m.to_string());
        let verdict = if view.won() {
            "YOU WIN!!"
        } else if view.lost() {
            "THEY WON!!"
        } else {
            "-- there was no winner --"
        };
        canvas.label(Rect::new(8, 8, column, 24), &format!("YOUR MOVE: {}", mine), Rgb::BLACK);
        canvas.label(
            Rect::new(8, 32, column, 48),
            &format!("{}'s MOVE: {}", opponent.name(), theirs),
            Rgb::BLACK,
        );
        canvas.label(Rect::new(8, 56, column, 72), verdict, Rgb::BLACK);
    }
    fn rankings(&self, canvas: &mut Canvas, view: &PlayerView) {
        let split = (W + RANKINGS_SPLIT_X) / 2;
        for (i, player) in view.rankings.iter().enumerate() {
            let y = 8 + 16 * i as i32;
            let name = match player.handle() == self.handle {
                true => format!("{}*", player.name()),
                false => player.name().to_string(),
            };
            canvas.label(Rect::new(RANKINGS_SPLIT_X + 8, y, split - 8, y + 8), &name, Rgb::BLACK);
            canvas.label(
                Rect::new(split, y, W - 8, y + 8),
                &player.wins().to_string(),
                Rgb::BLACK,
            );
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        self.session.leave(self.handle);
    }
}
