//! A single shot placement and its grid coordinates.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::position::{DepthPosition, HorizontalPosition, Space};

/// Highest y coordinate on the combined two-space grid.
const GRID_FAR_EDGE: u8 = 9;

/// One position record in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Shot {
    /// Horizontal placement.
    pub horizontal: HorizontalPosition,
    /// Depth placement.
    pub depth: DepthPosition,
    /// Court half (1 or 2).
    #[schema(value_type = u8, minimum = 1, maximum = 2)]
    pub space: Space,
}

/// A point on the continuous 5×10 grid spanning both spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Horizontal coordinate, 0 to 4.
    pub x: f64,
    /// Depth coordinate, 0 to 9; 4 and 5 sit either side of the net.
    pub y: f64,
}

impl Shot {
    /// Creates a shot.
    #[must_use]
    pub const fn new(horizontal: HorizontalPosition, depth: DepthPosition, space: Space) -> Self {
        Self {
            horizontal,
            depth,
            space,
        }
    }

    /// Maps the shot onto the combined grid.
    ///
    /// Space 1 keeps the depth ordinal as `y` (`Front` = 4). Space 2 is
    /// mirrored so `Front` = 5 and `Back` = 9.
    #[must_use]
    pub fn coordinates(&self) -> GridPoint {
        let depth = self.depth.ordinal();
        let y = match self.space {
            Space::One => depth,
            Space::Two => GRID_FAR_EDGE - depth,
        };
        GridPoint {
            x: f64::from(self.horizontal.ordinal()),
            y: f64::from(y),
        }
    }

    /// Euclidean distance to another shot on the combined grid.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let a = self.coordinates();
        let b = other.coordinates();
        (a.x - b.x).hypot(a.y - b.y)
    }
}

/// Distances between each pair of temporally consecutive shots.
///
/// Returns one entry fewer than the number of shots.
#[must_use]
pub fn consecutive_distances(shots: &[Shot]) -> Vec<f64> {
    shots
        .windows(2)
        .filter_map(|pair| match pair {
            [a, b] => Some(a.distance_to(b)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn center_front_maps_either_side_of_net() {
        let near = Shot::new(HorizontalPosition::Center, DepthPosition::Front, Space::One);
        let far = Shot::new(HorizontalPosition::Center, DepthPosition::Front, Space::Two);

        assert_eq!(near.coordinates(), GridPoint { x: 2.0, y: 4.0 });
        assert_eq!(far.coordinates(), GridPoint { x: 2.0, y: 5.0 });
        assert!((near.distance_to(&far) - 1.0).abs() < EPS);
    }

    #[test]
    fn space_two_back_is_far_edge() {
        let shot = Shot::new(HorizontalPosition::Left, DepthPosition::Back, Space::Two);
        assert_eq!(shot.coordinates(), GridPoint { x: 0.0, y: 9.0 });
    }

    #[test]
    fn distance_is_symmetric_and_diagonal() {
        let a = Shot::new(HorizontalPosition::Left, DepthPosition::Back, Space::One);
        let b = Shot::new(HorizontalPosition::CenterRight, DepthPosition::MidFront, Space::One);
        // (0,0) -> (3,3)
        let expected = 18.0_f64.sqrt();
        assert!((a.distance_to(&b) - expected).abs() < EPS);
        assert!((b.distance_to(&a) - expected).abs() < EPS);
    }

    #[test]
    fn consecutive_distances_has_one_fewer_entry() {
        let shots = [
            Shot::new(HorizontalPosition::Center, DepthPosition::Front, Space::One),
            Shot::new(HorizontalPosition::Center, DepthPosition::Front, Space::Two),
            Shot::new(HorizontalPosition::Center, DepthPosition::Back, Space::One),
        ];
        let distances = consecutive_distances(&shots);
        assert_eq!(distances.len(), 2);
        assert!((distances.first().copied().unwrap_or_default() - 1.0).abs() < EPS);
        // (2,5) -> (2,0)
        assert!((distances.get(1).copied().unwrap_or_default() - 5.0).abs() < EPS);
        assert!(consecutive_distances(shots.get(..1).unwrap_or_default()).is_empty());
    }
}
