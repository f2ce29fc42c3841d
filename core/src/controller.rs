use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Pointer input provided by the windowing layer.
pub trait Pointer {
    /// Current cursor position.
    fn position(&self) -> PixelPos;
    /// Takes the oldest pending press, `None` when nothing was pressed.
    fn next_press(&mut self) -> Option<PointerButton>;
}

/// Queue of presses, each remembered with the cursor position it happened at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PressQueue {
    position: PixelPos,
    pending: VecDeque<(PixelPos, PointerButton)>,
}

impl PressQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pos: PixelPos, button: PointerButton) {
        self.pending.push_back((pos, button));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Pointer for PressQueue {
    fn position(&self) -> PixelPos {
        self.position
    }

    fn next_press(&mut self) -> Option<PointerButton> {
        let (pos, button) = self.pending.pop_front()?;
        self.position = pos;
        Some(button)
    }
}

/// What a single frame of input did to the field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrameInput {
    /// No press was waiting.
    Idle,
    /// The press missed the field, used an unbound button, or the game is over.
    Ignored,
    Reveal(RevealOutcome),
    Flag(MarkOutcome),
}

/// Drives a [`Field`] from pointer input, one frame at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct Controller {
    field: Field,
}

impl Controller {
    pub fn new(field: Field) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn into_field(self) -> Field {
        self.field
    }

    /// Handles at most one press from `pointer`.
    ///
    /// Once the game is won or lost presses are no longer read.
    pub fn update(&mut self, pointer: &mut impl Pointer) -> Result<FrameInput> {
        if self.field.is_finished() {
            return Ok(FrameInput::Idle);
        }

        let Some(button) = pointer.next_press() else {
            return Ok(FrameInput::Idle);
        };
        let pos = pointer.position();
        if !self.field.contains_pixel(pos) {
            log::warn!("{:?} press at {:?} outside the field", button, pos);
            return Ok(FrameInput::Ignored);
        }

        Ok(match button {
            PointerButton::Left => FrameInput::Reveal(self.field.reveal_tile(pos)?),
            PointerButton::Right => FrameInput::Flag(self.field.flag_tile(pos)?),
            PointerButton::Middle => FrameInput::Ignored,
        })
    }

    /// Draws the field and, once the game is over, the matching banner.
    pub fn compose_frame(&self, surface: &mut impl Surface) {
        self.field.draw(surface);

        let banner = if self.field.all_tiles_revealed() {
            Sprite::WinBanner
        } else if self.field.mine_triggered() {
            Sprite::LoseBanner
        } else {
            return;
        };
        let (center_x, center_y) = self.field.boundary().center();
        let (width, height) = BANNER_SIZE;
        surface.draw_sprite(banner, (center_x - width / 2, center_y - height / 2));
    }
}
