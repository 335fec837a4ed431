// Held arrow keys and the status line they drive.

use minifb::Key;

pub const LIFT_MESSAGE: &str = "[ LIFT ACTIVATED ] : Rising in Altitude";
pub const BALLAST_MESSAGE: &str = "[ BALLAST ACTIVATED ] : Descending in Altitude";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[cfg(test)]
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Which arrows are currently down. Axes are independent, so opposite keys
/// held together cancel out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Unit step per axis: (-1, 0 or 1) for x and y, screen coordinates.
    pub fn axes(&self) -> (f32, f32) {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        (axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Status text change caused by a key edge, if any.
pub fn message_for(dir: Direction, pressed: bool) -> Option<Option<&'static str>> {
    match (dir, pressed) {
        (Direction::Up, true) => Some(Some(LIFT_MESSAGE)),
        (Direction::Down, true) => Some(Some(BALLAST_MESSAGE)),
        (Direction::Up | Direction::Down, false) => Some(None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = HeldKeys::default();
        keys.set(Direction::Left, true);
        keys.set(Direction::Right, true);
        keys.set(Direction::Up, true);
        assert_eq!(keys.axes(), (0.0, -1.0));
    }

    #[test]
    fn only_vertical_keys_touch_the_message() {
        assert_eq!(message_for(Direction::Up, true), Some(Some(LIFT_MESSAGE)));
        assert_eq!(message_for(Direction::Down, false), Some(None));
        assert_eq!(message_for(Direction::Left, true), None);
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(Direction::from_key(Key::Right), Some(Direction::Right));
        assert_eq!(Direction::from_key(Key::Space), None);
    }
}
