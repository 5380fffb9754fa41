use std::fmt;

use strum::{Display, EnumIter};

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Size of a toroidal map in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reduces any coordinate pair into `[0, width) × [0, height)`.
    ///
    /// An empty map has nothing to wrap into; the input comes back unchanged.
    pub fn wrap(&self, x: i32, y: i32) -> Position {
        if self.is_empty() {
            return Position::new(x, y);
        }
        Position::new(
            x.rem_euclid(self.width as i32),
            y.rem_euclid(self.height as i32),
        )
    }

    pub fn wrap_position(&self, position: Position) -> Position {
        self.wrap(position.x, position.y)
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

/// Direction a unit is looking at on the world map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Facing {
    /// Facing implied by an attempted movement delta (y grows downwards).
    ///
    /// Priority when both axes are set: down, left, right, up. A zero delta
    /// implies nothing and yields `None`.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        if dy > 0 {
            Some(Facing::Down)
        } else if dx < 0 {
            Some(Facing::Left)
        } else if dx > 0 {
            Some(Facing::Right)
        } else if dy < 0 {
            Some(Facing::Up)
        } else {
            None
        }
    }
}

/// Cardinal movement intent supplied by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Held directions are polled in this order when a step is due.
    pub const POLL_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Integer resource meter (e.g., health, mana) tracked per unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub const fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn deplete(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Restores up to `amount`, capped at the maximum. Returns what was gained.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }
}

impl fmt::Display for ResourceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_handles_negative_coordinates() {
        let dims = MapDimensions::new(64, 64);
        assert_eq!(dims.wrap(-1, 5), Position::new(63, 5));
        assert_eq!(dims.wrap(64, -65), Position::new(0, 63));
    }

    #[test]
    fn facing_priority_prefers_vertical_down() {
        assert_eq!(Facing::from_delta(-1, 1), Some(Facing::Down));
        assert_eq!(Facing::from_delta(-1, -1), Some(Facing::Left));
        assert_eq!(Facing::from_delta(1, -1), Some(Facing::Right));
        assert_eq!(Facing::from_delta(0, -1), Some(Facing::Up));
        assert_eq!(Facing::from_delta(0, 0), None);
    }

    #[test]
    fn meter_clamps_both_ways() {
        let mut hp = ResourceMeter::new(5, 10);
        hp.deplete(8);
        assert_eq!(hp.current, 0);
        assert_eq!(hp.restore(30), 10);
        assert_eq!(hp.current, 10);
    }
}
