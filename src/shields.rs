//! Destructible barriers between the player and the formation.

use crate::config::GameConfig;
use crate::entities::{Bounds, Shield};

pub const SHIELD_COUNT: usize = 4;
pub const SHIELD_SIZE: i32 = 60;
pub const SHIELD_HEALTH: u32 = 3;
/// Distance from the shields' top edge to the bottom of the window.
const SHIELD_ELEVATION: i32 = 150;

#[derive(Clone, Debug, PartialEq)]
pub struct ShieldBank {
    shields: Vec<Shield>,
}

impl ShieldBank {
    /// Four full-health shields evenly spaced across the window.
    pub fn standard(config: &GameConfig) -> Self {
        let spacing = config.window.width / (SHIELD_COUNT as i32 + 1);
        let y = config.window.height - SHIELD_ELEVATION;
        let shields = (0..SHIELD_COUNT as i32)
            .map(|i| Shield {
                bounds: Bounds::new(
                    spacing * (i + 1) - SHIELD_SIZE / 2,
                    y,
                    SHIELD_SIZE,
                    SHIELD_SIZE,
                ),
                health: SHIELD_HEALTH,
            })
            .collect();
        Self { shields }
    }

    pub fn from_shields(shields: Vec<Shield>) -> Self {
        Self { shields }
    }

    pub fn as_slice(&self) -> &[Shield] {
        &self.shields
    }

    pub fn len(&self) -> usize {
        self.shields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shields.is_empty()
    }

    /// Knock one point of health off shield `index`. Returns `true` when
    /// that destroyed the shield, which is then removed; later indices shift
    /// down by one. An index past the end is ignored.
    pub fn resolve_hit(&mut self, index: usize) -> bool {
        let Some(shield) = self.shields.get_mut(index) else {
            return false;
        };
        shield.health = shield.health.saturating_sub(1);
        if shield.health == 0 {
            self.shields.remove(index);
            true
        } else {
            false
        }
    }
}
