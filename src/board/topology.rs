//! Board topology: the shared circular path, safe cells and home stretches.
//!
//! Token progress is stored as a *relative position*, private to the
//! token's color:
//!
//! | Relative position | Meaning |
//! |---|---|
//! | `-1` | at home |
//! | `0..L` | on the shared path, `L` = path length |
//! | `L..L+H` | in the color's home stretch, `H` = stretch length |
//! | `L+H` | finished (terminal slot) |
//!
//! The `Topology` maps relative positions to *absolute* cells on the shared
//! path, which is where tokens of different colors can meet.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Color, RuleConfig, Token};

/// Where a token is, as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenLocation {
    /// In the color's home base.
    Home,
    /// On the shared path at an absolute cell.
    Track { cell: u16 },
    /// In the color's private home stretch (0-based).
    Stretch { index: u16 },
    /// Parked in the terminal slot.
    Finished,
}

/// Immutable board shape derived from a `RuleConfig`.
///
/// ## Usage
///
/// ```
/// use ludo_engine::board::{Topology, TokenLocation};
/// use ludo_engine::core::{Color, RuleConfig};
///
/// let topology = Topology::new(&RuleConfig::default());
///
/// assert_eq!(topology.entry_offset(Color::Green), 26);
/// assert_eq!(topology.absolute_cell(Color::Green, 30), Some(4));
/// assert!(topology.is_safe(26));
/// assert_eq!(topology.location_of(Color::Blue, 54), TokenLocation::Stretch { index: 2 });
/// ```
#[derive(Clone, Debug)]
pub struct Topology {
    path_length: u16,
    stretch_length: u16,
    safe_cells: FxHashSet<u16>,
}

impl Topology {
    /// Build the topology for a rule set.
    #[must_use]
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            path_length: config.path_length,
            stretch_length: config.stretch_length,
            safe_cells: config.safe_cells.iter().copied().collect(),
        }
    }

    /// Cells on the shared path.
    #[must_use]
    pub fn path_length(&self) -> u16 {
        self.path_length
    }

    /// Cells in each home stretch.
    #[must_use]
    pub fn stretch_length(&self) -> u16 {
        self.stretch_length
    }

    /// Relative position of the terminal slot.
    #[must_use]
    pub fn terminal(&self) -> u16 {
        self.path_length.saturating_add(self.stretch_length)
    }

    /// Absolute cell where a color's tokens enter the shared path.
    #[must_use]
    pub fn entry_offset(&self, color: Color) -> u16 {
        color.quadrant() as u16 * (self.path_length / 4)
    }

    /// Last absolute cell a color visits before turning into its stretch.
    #[must_use]
    pub fn junction(&self, color: Color) -> u16 {
        self.wrap(color, self.path_length - 1)
    }

    /// Absolute cell `steps` past a color's entry, wrapping around the path.
    fn wrap(&self, color: Color, steps: u16) -> u16 {
        let cell = (u32::from(self.entry_offset(color)) + u32::from(steps)) % u32::from(self.path_length);
        cell as u16
    }

    /// Check if an absolute cell is a sanctuary.
    #[must_use]
    pub fn is_safe(&self, cell: u16) -> bool {
        self.safe_cells.contains(&cell)
    }

    /// Absolute cell for a relative position, if it lies on the shared path.
    #[must_use]
    pub fn absolute_cell(&self, color: Color, relative_position: i16) -> Option<u16> {
        let rel = u16::try_from(relative_position).ok()?;
        (rel < self.path_length).then(|| self.wrap(color, rel))
    }

    /// Locate a relative position.
    #[must_use]
    pub fn location_of(&self, color: Color, relative_position: i16) -> TokenLocation {
        let Ok(rel) = u16::try_from(relative_position) else {
            return TokenLocation::Home;
        };
        if rel < self.path_length {
            TokenLocation::Track {
                cell: self.wrap(color, rel),
            }
        } else if rel < self.terminal() {
            TokenLocation::Stretch {
                index: rel - self.path_length,
            }
        } else {
            TokenLocation::Finished
        }
    }

    /// Locate a token.
    #[must_use]
    pub fn location(&self, color: Color, token: &Token) -> TokenLocation {
        if token.finished {
            TokenLocation::Finished
        } else {
            self.location_of(color, token.relative_position)
        }
    }

    /// Absolute cell a token stands on, if it is on the shared path.
    #[must_use]
    pub fn token_cell(&self, color: Color, token: &Token) -> Option<u16> {
        match self.location(color, token) {
            TokenLocation::Track { cell } => Some(cell),
            _ => None,
        }
    }
}
