//! Static sport reference data used to build generation prompts.
//!
//! The table is compiled in and never mutated, so profiles can be handed
//! out as `&'static` references and shared freely between requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sports the generator knows how to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    /// Badminton.
    Badminton,
    /// Tennis.
    Tennis,
    /// Volleyball.
    Volleyball,
    /// Table tennis.
    TableTennis,
    /// Pickleball.
    Pickleball,
}

/// Error returned when a sport key is not in the reference table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported sport: {0}")]
pub struct UnsupportedSport(pub String);

impl Sport {
    /// Every supported sport, in catalogue order.
    pub const ALL: [Self; 5] = [
        Self::Badminton,
        Self::Tennis,
        Self::Volleyball,
        Self::TableTennis,
        Self::Pickleball,
    ];

    /// Lower-case key used on the wire.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Badminton => "badminton",
            Self::Tennis => "tennis",
            Self::Volleyball => "volleyball",
            Self::TableTennis => "table_tennis",
            Self::Pickleball => "pickleball",
        }
    }

    /// Reference profile for this sport.
    #[must_use]
    pub fn profile(self) -> &'static SportProfile {
        match self {
            Self::Badminton => &BADMINTON,
            Self::Tennis => &TENNIS,
            Self::Volleyball => &VOLLEYBALL,
            Self::TableTennis => &TABLE_TENNIS,
            Self::Pickleball => &PICKLEBALL,
        }
    }
}

impl FromStr for Sport {
    type Err = UnsupportedSport;

    /// Parses a sport key, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sport| sport.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnsupportedSport(s.to_string()))
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A named tactical rule for one shot type. Prompt content only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotConstraint {
    /// Shot type name, e.g. `"smash"`.
    pub shot_type: &'static str,
    /// Free-text rule.
    pub rule: &'static str,
}

/// Descriptive and tactical vocabulary for one sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportProfile {
    /// Which sport this profile describes.
    pub sport: Sport,
    /// Court or table layout.
    pub court_description: &'static str,
    /// Common shot names.
    pub shot_types: &'static str,
    /// Tactical concepts to draw on.
    pub tactical_concepts: &'static str,
    /// How spaces 1 and 2 relate to the playing area.
    pub space_description: &'static str,
    /// Shot-type rules; empty for sports without a table.
    pub shot_constraints: &'static [ShotConstraint],
}

impl SportProfile {
    /// Returns the profile for `key`, falling back to badminton when the
    /// key is not recognised.
    #[must_use]
    pub fn lookup(key: &str) -> &'static Self {
        key.parse::<Sport>()
            .map_or(&BADMINTON, |sport| sport.profile())
    }

    /// Whether the profile carries shot-type constraints.
    #[must_use]
    pub const fn has_constraints(&self) -> bool {
        !self.shot_constraints.is_empty()
    }
}

const NET_SPLIT_COURT: &str =
    "Space 1 and Space 2 represent the two halves of the court separated by the net";

static BADMINTON: SportProfile = SportProfile {
    sport: Sport::Badminton,
    court_description: "badminton court with forecourt (front), midcourt (mid), and backcourt (back) areas",
    shot_types: "clear, drop, smash, net shot, drive, lift",
    tactical_concepts: "attacking from the back, net play, deception, court coverage",
    space_description: NET_SPLIT_COURT,
    shot_constraints: &[
        ShotConstraint {
            shot_type: "smash",
            rule: "Smashes are powerful attacking shots that typically cannot land in the front court (Front, Mid Front positions). They usually land in Mid, Mid Back, or Back positions due to their steep downward trajectory.",
        },
        ShotConstraint {
            shot_type: "clear",
            rule: "Clears are defensive/neutral shots hit high and deep, typically landing in Back or Mid Back positions",
        },
        ShotConstraint {
            shot_type: "drop",
            rule: "Drop shots are finesse shots that can land anywhere but are most effective in Mid Front and Front positions",
        },
        ShotConstraint {
            shot_type: "net",
            rule: "Net shots must land in Front or Mid Front positions by nature of the shot",
        },
        ShotConstraint {
            shot_type: "drive",
            rule: "Drives are fast, flat shots typically landing in Mid to Mid Back positions",
        },
        ShotConstraint {
            shot_type: "lift",
            rule: "Lifts are defensive shots from the front court, usually targeting Back or Mid Back positions",
        },
    ],
};

static TENNIS: SportProfile = SportProfile {
    sport: Sport::Tennis,
    court_description: "tennis court with baseline (back), service boxes (mid), and net area (front)",
    shot_types: "groundstroke, volley, serve, approach shot, passing shot, lob",
    tactical_concepts: "baseline rallies, net approaches, court positioning, point construction",
    space_description: NET_SPLIT_COURT,
    shot_constraints: &[],
};

static VOLLEYBALL: SportProfile = SportProfile {
    sport: Sport::Volleyball,
    court_description: "volleyball court with back row (back), middle (mid), and front row (front) positions",
    shot_types: "spike, set, dig, serve, block, tip",
    tactical_concepts: "attack patterns, defensive positioning, rotation systems",
    space_description: NET_SPLIT_COURT,
    shot_constraints: &[],
};

static TABLE_TENNIS: SportProfile = SportProfile {
    sport: Sport::TableTennis,
    court_description: "table tennis table with back (far from net), middle, and front (near net) areas",
    shot_types: "topspin, backspin, sidespin, smash, push, flick",
    tactical_concepts: "spin variation, placement, speed control, footwork patterns",
    space_description: "Space 1 and Space 2 represent the two halves of the table separated by the net",
    shot_constraints: &[],
};

static PICKLEBALL: SportProfile = SportProfile {
    sport: Sport::Pickleball,
    court_description: "pickleball court with baseline (back), non-volley zone/kitchen (mid), and net area (front)",
    shot_types: "dink, drive, lob, drop shot, volley, serve, third shot drop",
    tactical_concepts: "soft game at kitchen, power from baseline, court positioning, patience",
    space_description: NET_SPLIT_COURT,
    shot_constraints: &[],
};
