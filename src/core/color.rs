//! Seat colors and per-color data storage.
//!
//! ## Color
//!
//! The fixed four-color palette, in clockwise board order. A color's
//! quadrant index determines where its tokens enter the shared path.
//!
//! ## ColorMap
//!
//! Per-color data storage backed by an array for O(1) access.
//! Supports iteration and indexing by `Color`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of colors in the palette.
pub const PALETTE_SIZE: usize = 4;

/// A player identity for one seat.
///
/// Colors are listed in clockwise board order, so `quadrant()` doubles as
/// the multiplier for the color's entry offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Blue,
    Red,
    Green,
    Yellow,
}

impl Color {
    /// All colors in clockwise board order.
    pub const ALL: [Color; PALETTE_SIZE] = [Color::Blue, Color::Red, Color::Green, Color::Yellow];

    /// Quadrant index (0-3), clockwise from Blue.
    #[must_use]
    pub const fn quadrant(self) -> usize {
        self as usize
    }

    /// Look up a color by quadrant index.
    #[must_use]
    pub fn from_quadrant(index: usize) -> Option<Color> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase name, as used by UI layers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }

    /// Default roster for a given player count.
    ///
    /// Two players sit diagonally opposite each other so both have the same
    /// distance to travel before meeting.
    ///
    /// ```
    /// use ludo_engine::core::Color;
    ///
    /// assert_eq!(Color::default_roster(2), Some(vec![Color::Blue, Color::Green]));
    /// assert_eq!(Color::default_roster(4).map(|r| r.len()), Some(4));
    /// assert_eq!(Color::default_roster(5), None);
    /// ```
    #[must_use]
    pub fn default_roster(player_count: usize) -> Option<Vec<Color>> {
        match player_count {
            2 => Some(vec![Color::Blue, Color::Green]),
            3 => Some(vec![Color::Blue, Color::Red, Color::Green]),
            4 => Some(Self::ALL.to_vec()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-color data storage with O(1) access.
///
/// Always holds one entry for every palette color, whether or not that
/// color is seated in the current match. Use `ColorMap::new()` to create
/// with a factory function, or `ColorMap::with_value()` to initialize all
/// entries to the same value.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Color, ColorMap};
///
/// let mut captures: ColorMap<u32> = ColorMap::with_value(0);
/// captures[Color::Red] += 2;
///
/// assert_eq!(captures[Color::Red], 2);
/// assert_eq!(captures[Color::Blue], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; PALETTE_SIZE],
}

impl<T> ColorMap<T> {
    /// Create a new ColorMap with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(factory),
        }
    }

    /// Create a new ColorMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a color's data.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.quadrant()]
    }

    /// Get a mutable reference to a color's data.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.quadrant()]
    }

    /// Iterate over (Color, &T) pairs in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Color, &mut T) pairs in board order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Color, &mut T)> {
        Color::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T: Default> Default for ColorMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
