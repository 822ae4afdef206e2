#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the offset would go negative; the caller checks the far grid edge.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate::new(x, y)),
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const COMPASS_PRIMARY_DIRECTIONS: [CompassPrimary; 4] =
    [CompassPrimary::North, CompassPrimary::South, CompassPrimary::East, CompassPrimary::West];

/// Traversal state of a cell. Owned and mutated by the maze core, the renderer only reads it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum NodeStatus {
    Unvisited,
    /// Discovered by a search but not yet expanded.
    Frontier,
    Visited,
    /// Where the player stands in manual mode.
    Current,
    OnSolutionPath,
}

impl Default for NodeStatus {
    fn default() -> NodeStatus {
        NodeStatus::Unvisited
    }
}

impl NodeStatus {
    /// Has a search already discovered this node (queued or expanded)?
    #[inline]
    pub fn is_reached(self) -> bool {
        self != NodeStatus::Unvisited
    }
}
