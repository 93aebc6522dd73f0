//! Game setup values exchanged at session start.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::piece::Color;

/// Port a hosting session listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 9000;

/// Clock mode. Recorded and transmitted, never enforced.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeControl {
    #[default]
    Unlimited,
    Timer,
}

/// Session setup: which color the local user plays and the clock settings.
///
/// `user_color == None` means "pick at random"; see [`GameConfig::resolve`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub user_color: Option<Color>,
    pub time_control: TimeControl,
    pub time_left_secs: u32,
    pub increment_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            user_color: Some(Color::White),
            time_control: TimeControl::Unlimited,
            time_left_secs: 60,
            increment_secs: 2,
        }
    }
}

impl GameConfig {
    /// Fix the user color, drawing it uniformly from `rng` if unset.
    #[must_use]
    pub fn resolve<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        if self.user_color.is_none() {
            let color = if rng.gen_bool(0.5) {
                Color::White
            } else {
                Color::Black
            };
            self.user_color = Some(color);
        }
        self
    }

    /// The user color, or White for a config that was never resolved.
    #[inline]
    #[must_use]
    pub fn color(&self) -> Color {
        self.user_color.unwrap_or(Color::White)
    }

    /// The same config seen from the other side of the board.
    #[must_use]
    pub fn for_opponent(&self) -> Self {
        GameConfig {
            user_color: self.user_color.map(Color::opponent),
            ..*self
        }
    }
}
