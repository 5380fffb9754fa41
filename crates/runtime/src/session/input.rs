use game_core::Direction;

/// Directions currently held down by the input layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldDirections {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl HeldDirections {
    pub fn press(&mut self, direction: Direction) {
        *self.slot(direction) = true;
    }

    pub fn release(&mut self, direction: Direction) {
        *self.slot(direction) = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Held directions in polling order.
    pub fn held(&self) -> Vec<Direction> {
        Direction::POLL_ORDER
            .into_iter()
            .filter(|direction| self.is_held(*direction))
            .collect()
    }

    fn slot(&mut self, direction: Direction) -> &mut bool {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keeps_poll_order() {
        let mut input = HeldDirections::default();
        input.press(Direction::Right);
        input.press(Direction::Up);
        assert_eq!(input.held(), vec![Direction::Up, Direction::Right]);
        input.release(Direction::Up);
        assert_eq!(input.held(), vec![Direction::Right]);
    }
}
