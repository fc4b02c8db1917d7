//! Player input state

/// Intent flags produced by the input collaborator each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// -1, 0 or 1; opposing keys cancel out
    pub fn horizontal(&self) -> i8 {
        match (self.move_left, self.move_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}
