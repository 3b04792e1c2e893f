//! Per-frame input signals, decoupled from any keyboard backend.

/// Gameplay input for one frame. `left`/`right` are held keys; `fire` and
/// `pause` are edge-triggered and should be set only on the press frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub pause: bool,
}

impl FrameInput {
    /// Net horizontal direction: -1, 0 or +1.
    pub fn direction(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Up,
    Down,
    Confirm,
    Cancel,
}
