//! Main, pause and game-over menus: a list of options, a cursor, and a
//! `select` that turns navigation events into a chosen index.

use crate::input::MenuEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    title: String,
    options: &'static [&'static str],
    selected: usize,
    /// Index reported when the player backs out with `Cancel`.
    cancel_index: usize,
}

impl Menu {
    pub const START: usize = 0;
    pub const QUIT_FROM_MAIN: usize = 1;

    pub const RESUME: usize = 0;
    pub const BACK_TO_MENU: usize = 1;
    pub const QUIT_FROM_PAUSE: usize = 2;

    pub const PLAY_AGAIN: usize = 0;
    pub const MAIN_MENU: usize = 1;
    pub const QUIT_FROM_GAME_OVER: usize = 2;

    pub fn main() -> Self {
        Self::new("SPACE INVADERS", &["Start Game", "Quit"], Self::QUIT_FROM_MAIN)
    }

    pub fn pause() -> Self {
        Self::new(
            "PAUSED",
            &["Return to Game", "Back to Menu", "Quit"],
            Self::RESUME,
        )
    }

    pub fn game_over(final_score: u32) -> Self {
        Self::new(
            format!("GAME OVER   Score: {final_score}"),
            &["Play Again", "Main Menu", "Quit"],
            Self::MAIN_MENU,
        )
    }

    fn new(title: impl Into<String>, options: &'static [&'static str], cancel_index: usize) -> Self {
        debug_assert!(cancel_index < options.len());
        Self {
            title: title.into(),
            options,
            selected: 0,
            cancel_index,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[&'static str] {
        self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Up/Down move the cursor (wrapping) and return `None`; Confirm returns
    /// the highlighted index; Cancel returns the menu's back-out index.
    pub fn select(&mut self, event: MenuEvent) -> Option<usize> {
        let len = self.options.len();
        match event {
            MenuEvent::Up => {
                self.selected = (self.selected + len - 1) % len;
                None
            }
            MenuEvent::Down => {
                self.selected = (self.selected + 1) % len;
                None
            }
            MenuEvent::Confirm => Some(self.selected),
            MenuEvent::Cancel => Some(self.cancel_index),
        }
    }
}
