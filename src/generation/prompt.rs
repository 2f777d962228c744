//! Instruction prompt construction.
//!
//! The wording here is tunable; what callers rely on is the content: sport
//! vocabulary, constraint lines, shot count, the alternation rule, the grid
//! mapping for both spaces, the optional distance block, and a JSON-only
//! output format with one example pair.

use crate::domain::{DepthPosition, HorizontalPosition, Shot, Space, SportProfile};

/// Line rendered in place of the constraint table for sports without one.
pub const NO_CONSTRAINTS_LINE: &str = "No specific shot constraints for this sport.";

/// Renders the generation prompt.
///
/// `sport` is looked up with [`SportProfile::lookup`], so an unknown key
/// renders with the badminton profile. The distance block is included only
/// when at least one bound is given.
#[must_use]
pub fn build_prompt(
    sport: &str,
    purpose: &str,
    num_shots: usize,
    min_distance: Option<f64>,
    max_distance: Option<f64>,
) -> String {
    let profile = SportProfile::lookup(sport);
    let constraints = format_constraints(profile);
    let distance_block = format_distance_block(min_distance, max_distance);
    let grid = format_grid();
    let horizontal_labels = quoted_labels(HorizontalPosition::ALL.iter().map(|h| h.label()));
    let depth_labels = quoted_labels(DepthPosition::ALL.iter().map(|d| d.label()));

    format!(
        "You are an expert {sport} coach creating a strategic shot sequence for training purposes.

TRAINING OBJECTIVE: {purpose}

SPORT CONTEXT:
- Sport: {sport}
- Court: {court}
- Common shots: {shots}
- Tactical focus: {tactics}
- Space layout: {spaces}

SPORT-SPECIFIC SHOT CONSTRAINTS:
{constraints}

SEQUENCE REQUIREMENTS:
- Generate exactly {num_shots} shots
- Shots must alternate between Space 1 and Space 2, starting with Space 1 (shot 1 in Space 1, shot 2 in Space 2, and so on)
- Each shot must use positions from the allowed lists below
- Respect the sport-specific shot constraints above when selecting positions
{distance_block}
POSITION SYSTEM:
Horizontal positions: {horizontal_labels}
Depth positions: {depth_labels}

GRID LAYOUT (for distance calculations, 5x10 continuous grid):
{grid}

STRATEGIC CONSIDERATIONS:
Based on the training objective \"{purpose}\", create a sequence that:
1. Supports the specific training goal
2. Creates realistic {sport} patterns
3. Provides appropriate challenge progression
4. Maintains tactical coherence

OUTPUT FORMAT:
Respond with ONLY a valid JSON array of shot objects. Each shot must have exactly these fields:
- \"horizontal\": one of {horizontal_labels}
- \"depth\": one of {depth_labels}
- \"space\": 1 or 2 (alternating, starting with 1)

Example format:
[
  {{\"horizontal\": \"Center\", \"depth\": \"Back\", \"space\": 1}},
  {{\"horizontal\": \"Left\", \"depth\": \"Front\", \"space\": 2}}
]

Generate the sequence now:",
        court = profile.court_description,
        shots = profile.shot_types,
        tactics = profile.tactical_concepts,
        spaces = profile.space_description,
    )
}

fn format_constraints(profile: &SportProfile) -> String {
    if !profile.has_constraints() {
        return NO_CONSTRAINTS_LINE.to_string();
    }
    profile
        .shot_constraints
        .iter()
        .map(|c| format!("- {}: {}", c.shot_type.to_uppercase(), c.rule))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_distance_block(min_distance: Option<f64>, max_distance: Option<f64>) -> String {
    if min_distance.is_none() && max_distance.is_none() {
        return String::new();
    }
    let min = min_distance.unwrap_or(0.0);
    let max = max_distance.map_or_else(|| "unlimited".to_string(), |m| m.to_string());
    format!(
        "
DISTANCE CONSTRAINTS:
- Each pair of consecutive shots must be at least {min} and at most {max} grid units apart
- Distance is the Euclidean distance between the shots' grid coordinates (see GRID LAYOUT)
- Consider distance carefully when selecting positions
"
    )
}

/// Renders the coordinate mapping for both spaces from the same mapping
/// [`Shot::coordinates`] uses.
fn format_grid() -> String {
    let x_axis = HorizontalPosition::ALL
        .iter()
        .map(|h| format!("{}={}", h.label(), h.ordinal()))
        .collect::<Vec<_>>()
        .join(", ");

    let depth_row = |space: Space, order: &mut dyn Iterator<Item = DepthPosition>| {
        order
            .map(|d| {
                let point = Shot::new(HorizontalPosition::Left, d, space).coordinates();
                format!("{}={}", d.label(), point.y)
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    let space_one = depth_row(Space::One, &mut DepthPosition::ALL.into_iter());
    let space_two = depth_row(Space::Two, &mut DepthPosition::ALL.into_iter().rev());

    format!(
        "- x (both spaces): {x_axis}
- Space 1 y: {space_one} (Front is nearest the net)
- Space 2 y: {space_two} (Front is nearest the net, mirrored)"
    )
}

fn quoted_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    let quoted = labels.map(|l| format!("\"{l}\"")).collect::<Vec<_>>();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badminton_prompt_carries_smash_rule() {
        let prompt = build_prompt("badminton", "net play", 6, None, None);
        assert!(prompt.contains("- SMASH: Smashes are powerful attacking shots"));
        assert!(prompt.contains("cannot land in the front court (Front, Mid Front positions)"));
        assert!(!prompt.contains(NO_CONSTRAINTS_LINE));
    }

    #[test]
    fn tennis_prompt_uses_fallback_line() {
        let prompt = build_prompt("tennis", "baseline rallies", 4, None, None);
        assert!(prompt.contains(NO_CONSTRAINTS_LINE));
        assert!(prompt.contains("groundstroke, volley"));
        assert!(!prompt.contains("SMASH"));
    }

    #[test]
    fn unknown_sport_renders_badminton_profile() {
        let prompt = build_prompt("curling", "sweeping", 2, None, None);
        assert!(prompt.contains("badminton court with forecourt"));
        assert!(prompt.contains("- SMASH:"));
    }

    #[test]
    fn prompt_states_count_alternation_and_purpose() {
        let prompt = build_prompt("volleyball", "serve receive", 12, None, None);
        assert!(prompt.contains("Generate exactly 12 shots"));
        assert!(prompt.contains("starting with Space 1"));
        assert!(prompt.contains("TRAINING OBJECTIVE: serve receive"));
        assert!(prompt.contains("- \"horizontal\": one of [\"Left\", \"Center Left\""));
        assert!(prompt.contains("- \"space\": 1 or 2"));
        assert!(prompt.contains("{\"horizontal\": \"Center\", \"depth\": \"Back\", \"space\": 1}"));
    }

    #[test]
    fn grid_table_covers_both_spaces() {
        let prompt = build_prompt("tennis", "x", 2, None, None);
        assert!(prompt.contains("Left=0, Center Left=1, Center=2, Center Right=3, Right=4"));
        assert!(prompt.contains("Space 1 y: Back=0, Mid Back=1, Mid=2, Mid Front=3, Front=4"));
        assert!(prompt.contains("Space 2 y: Front=5, Mid Front=6, Mid=7, Mid Back=8, Back=9"));
    }

    #[test]
    fn distance_block_only_with_bounds() {
        let without = build_prompt("tennis", "x", 2, None, None);
        assert!(!without.contains("DISTANCE CONSTRAINTS"));

        let max_only = build_prompt("tennis", "x", 2, None, Some(3.5));
        assert!(max_only.contains("DISTANCE CONSTRAINTS"));
        assert!(max_only.contains("at least 0 and at most 3.5 grid units"));

        let min_only = build_prompt("tennis", "x", 2, Some(2.0), None);
        assert!(min_only.contains("at least 2 and at most unlimited grid units"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_prompt("pickleball", "dinking", 8, Some(1.0), Some(4.0));
        let b = build_prompt("pickleball", "dinking", 8, Some(1.0), Some(4.0));
        assert_eq!(a, b);
    }
}
