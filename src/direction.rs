use crate::position::PositionDelta;

/// The four directions a move request or an arrow cell can point.
///
/// `ALL` fixes the scan order (Up, Right, Down, Left) used everywhere a
/// neighbor walk is observable, so resolution stays deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Dir4 {
    Up,
    Right,
    Down,
    Left,
}

impl Dir4 {
    pub(crate) const ALL: [Dir4; 4] = [Dir4::Up, Dir4::Right, Dir4::Down, Dir4::Left];

    pub(crate) fn delta(self) -> PositionDelta {
        match self {
            Dir4::Up => PositionDelta::new(0, -1),
            Dir4::Right => PositionDelta::new(1, 0),
            Dir4::Down => PositionDelta::new(0, 1),
            Dir4::Left => PositionDelta::new(-1, 0),
        }
    }
}
