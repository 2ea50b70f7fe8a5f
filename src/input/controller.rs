use crate::game::{Direction, Phase};

/// Holds the direction the next tick will commit.
///
/// Every input source (keys, on-screen pad) goes through `request`, so the
/// reversal rule is the same for all of them.
#[derive(Debug, Clone)]
pub struct InputController {
    pending: Direction,
}

impl InputController {
    pub fn new(initial: Direction) -> Self {
        Self { pending: initial }
    }

    /// Offer a direction. It is kept only while the game is running and only
    /// if it does not reverse the committed direction. Returns whether it was
    /// accepted.
    pub fn request(&mut self, requested: Direction, committed: Direction, phase: Phase) -> bool {
        if phase != Phase::Running || requested.is_opposite(committed) {
            return false;
        }
        self.pending = requested;
        true
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Direction to apply on the tick that is starting
    pub fn commit(&self) -> Direction {
        self.pending
    }

    pub fn reset(&mut self, direction: Direction) {
        self.pending = direction;
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_reversal() {
        for committed in Direction::ALL {
            let mut input = InputController::new(committed);
            assert!(!input.request(committed.opposite(), committed, Phase::Running));
            assert_eq!(input.pending(), committed);
        }
    }

    #[test]
    fn test_accepts_turns_and_same_direction() {
        let mut input = InputController::default();
        assert!(input.request(Direction::Right, Direction::Right, Phase::Running));
        assert!(input.request(Direction::Up, Direction::Right, Phase::Running));
        assert_eq!(input.pending(), Direction::Up);
        assert!(input.request(Direction::Down, Direction::Right, Phase::Running));
        assert_eq!(input.commit(), Direction::Down);
    }

    #[test]
    fn test_reversal_checked_against_committed_not_pending() {
        let mut input = InputController::default();
        assert!(input.request(Direction::Up, Direction::Right, Phase::Running));
        // Left still reverses the committed Right, even though Up is pending
        assert!(!input.request(Direction::Left, Direction::Right, Phase::Running));
        assert_eq!(input.pending(), Direction::Up);
    }

    #[test]
    fn test_ignored_outside_running() {
        let mut input = InputController::default();
        assert!(!input.request(Direction::Up, Direction::Right, Phase::NotStarted));
        assert!(!input.request(Direction::Up, Direction::Right, Phase::Over));
        assert_eq!(input.pending(), Direction::Right);
    }
}
