//! Capture resolution.
//!
//! A token that lands on a non-safe shared cell sends every opposing token
//! on that cell back home. There is no stacking immunity off safe cells and
//! a color never captures its own tokens.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Topology;
use crate::core::{Color, ColorMap, ColorTokens};

/// One token sent home.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Owner of the captured token.
    pub color: Color,
    /// Index of the captured token.
    pub token: u8,
}

/// Tokens captured by one move.
pub type Captures = SmallVec<[Capture; 4]>;

/// Send home every opposing token standing on `landed_cell`.
///
/// Skips tokens that are at home, finished, in a home stretch or on a safe
/// cell. Returns the captured tokens; empty when nothing was captured.
pub fn check_and_capture(
    topology: &Topology,
    tokens: &mut ColorMap<ColorTokens>,
    moving: Color,
    landed_cell: u16,
) -> Captures {
    let mut captures = Captures::new();

    for (color, color_tokens) in tokens.iter_mut() {
        if color == moving {
            continue;
        }
        for token in color_tokens.iter_mut() {
            let Some(cell) = topology.token_cell(color, token) else {
                continue;
            };
            if cell == landed_cell && !topology.is_safe(cell) {
                token.send_home();
                captures.push(Capture {
                    color,
                    token: token.id,
                });
            }
        }
    }

    captures
}
