//! Court position vocabulary.
//!
//! Both axes are closed, order-significant enumerations: the ordinal of a
//! variant is what the coordinate mapping in [`super::shot`] uses. Wire
//! labels are the human-readable forms (`"Center Left"`, `"Mid Back"`) and
//! are matched case-sensitively.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Horizontal placement across the court, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum HorizontalPosition {
    /// Left sideline.
    #[serde(rename = "Left")]
    Left,
    /// Between the left sideline and the centre.
    #[serde(rename = "Center Left")]
    CenterLeft,
    /// Centre line.
    #[serde(rename = "Center")]
    Center,
    /// Between the centre and the right sideline.
    #[serde(rename = "Center Right")]
    CenterRight,
    /// Right sideline.
    #[serde(rename = "Right")]
    Right,
}

impl HorizontalPosition {
    /// All variants in ordinal order.
    pub const ALL: [Self; 5] = [
        Self::Left,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::Right,
    ];

    /// Zero-based ordinal (0 = `Left`, 4 = `Right`).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::CenterLeft => 1,
            Self::Center => 2,
            Self::CenterRight => 3,
            Self::Right => 4,
        }
    }

    /// Canonical wire label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::CenterLeft => "Center Left",
            Self::Center => "Center",
            Self::CenterRight => "Center Right",
            Self::Right => "Right",
        }
    }

    /// Looks up a variant by its exact canonical label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for HorizontalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Depth placement from the back line (0) to the net (4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DepthPosition {
    /// Back line.
    #[serde(rename = "Back")]
    Back,
    /// Between the back line and mid court.
    #[serde(rename = "Mid Back")]
    MidBack,
    /// Mid court.
    #[serde(rename = "Mid")]
    Mid,
    /// Between mid court and the net.
    #[serde(rename = "Mid Front")]
    MidFront,
    /// Nearest the net.
    #[serde(rename = "Front")]
    Front,
}

impl DepthPosition {
    /// All variants in ordinal order.
    pub const ALL: [Self; 5] = [
        Self::Back,
        Self::MidBack,
        Self::Mid,
        Self::MidFront,
        Self::Front,
    ];

    /// Zero-based ordinal (0 = `Back`, 4 = `Front`).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Back => 0,
            Self::MidBack => 1,
            Self::Mid => 2,
            Self::MidFront => 3,
            Self::Front => 4,
        }
    }

    /// Canonical wire label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::MidBack => "Mid Back",
            Self::Mid => "Mid",
            Self::MidFront => "Mid Front",
            Self::Front => "Front",
        }
    }

    /// Looks up a variant by its exact canonical label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for DepthPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the two court halves separated by the net.
///
/// Serialized as the bare integer `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Space {
    /// The half a sequence starts in.
    One,
    /// The opposite half.
    Two,
}

impl Space {
    /// Space a shot at the given 0-based position must occupy.
    ///
    /// Sequences start in space 1 and alternate every shot.
    #[must_use]
    pub const fn for_position(index: usize) -> Self {
        if index % 2 == 0 { Self::One } else { Self::Two }
    }

    /// Numeric form (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl From<Space> for u8 {
    fn from(space: Space) -> Self {
        space.number()
    }
}

impl TryFrom<u8> for Space {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("space must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_declaration_order() {
        for (i, h) in HorizontalPosition::ALL.iter().enumerate() {
            assert_eq!(usize::from(h.ordinal()), i);
        }
        for (i, d) in DepthPosition::ALL.iter().enumerate() {
            assert_eq!(usize::from(d.ordinal()), i);
        }
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(
            HorizontalPosition::from_label("Center Left"),
            Some(HorizontalPosition::CenterLeft)
        );
        assert_eq!(HorizontalPosition::from_label("center left"), None);
        assert_eq!(HorizontalPosition::from_label("CenterLeft"), None);
        assert_eq!(DepthPosition::from_label("Mid Front"), Some(DepthPosition::MidFront));
        assert_eq!(DepthPosition::from_label("front"), None);
    }

    #[test]
    fn serde_uses_canonical_labels() {
        let json = serde_json::to_string(&DepthPosition::MidBack).ok();
        assert_eq!(json.as_deref(), Some("\"Mid Back\""));

        let parsed: Result<HorizontalPosition, _> = serde_json::from_str("\"Center Right\"");
        let Ok(parsed) = parsed else {
            panic!("canonical label should deserialize");
        };
        assert_eq!(parsed, HorizontalPosition::CenterRight);
    }

    #[test]
    fn space_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Space::Two).ok().as_deref(), Some("2"));
        let parsed: Result<Space, _> = serde_json::from_str("1");
        assert!(matches!(parsed, Ok(Space::One)));
        let rejected: Result<Space, _> = serde_json::from_str("3");
        assert!(rejected.is_err());
    }

    #[test]
    fn space_alternates_from_one() {
        assert_eq!(Space::for_position(0), Space::One);
        assert_eq!(Space::for_position(1), Space::Two);
        assert_eq!(Space::for_position(6), Space::One);
    }
}
