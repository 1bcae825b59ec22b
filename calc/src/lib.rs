//! Tunnel layout calculation and character persistence
//!
//! Thin orchestration layer over `tunnel-core`: validates player inputs,
//! runs one calculation, and packages the result for display or
//! serialization. Saved characters and the last entry live in JSON files
//! managed by the [`store`] module.

pub mod store;

use serde::{Deserialize, Serialize};
use tunnel_core::{TunnelLayout, AREA_COUNT, DRAW_COUNT};

pub use store::{Character, CharacterStore, LastEntry};

/// One complete layout calculation
///
/// Everything a frontend needs to render the level: the derived seed, the
/// raw draws, the reduced rolls, the four area direction labels, and the
/// area-one creeper summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    pub player_id: u32,
    pub level: u32,
    pub seed: u32,
    pub draws: [u32; DRAW_COUNT],
    pub rolls: [u8; DRAW_COUNT],
    pub areas: [String; AREA_COUNT],
    pub creepers: CreeperSummary,
}

/// Area-one creeper count with a preformatted display line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreeperSummary {
    pub total: u8,
    pub first_part: u8,
    pub second_part: u8,
    pub summary: String,
}

/// Calculate the tunnel layout for a player and level
///
/// Invalid input is rejected before any generator state is allocated; the
/// computation itself cannot fail.
///
/// # Example
/// ```
/// let calculation = tunnel_calc::calculate(57, 10).unwrap();
/// assert_eq!(calculation.seed, 570);
/// ```
pub fn calculate(player_id: u32, level: u32) -> Result<Calculation, Box<dyn std::error::Error>> {
    if level < 1 {
        return Err("Tunnel level must be at least 1".into());
    }

    tracing::info!(
        "Calculating layout for player {} at level {}",
        player_id,
        level
    );

    let layout = TunnelLayout::generate(player_id, level);
    let creepers = layout.creeper_count();

    Ok(Calculation {
        player_id,
        level,
        seed: layout.seed,
        draws: layout.draws,
        rolls: layout.rolls,
        areas: layout.areas.map(|direction| direction.as_str().to_string()),
        creepers: CreeperSummary {
            total: creepers.total,
            first_part: creepers.first_part,
            second_part: creepers.second_part,
            summary: format!(
                "{} creepers ({} + {})",
                creepers.total, creepers.first_part, creepers.second_part
            ),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_golden_57_10() {
        let calculation = calculate(57, 10).unwrap();

        assert_eq!(calculation.seed, 570);
        assert_eq!(calculation.draws, [1617897028, 1992620429, 2109519711]);
        assert_eq!(calculation.rolls, [1, 1, 0]);
        assert_eq!(calculation.areas, ["Middle", "Middle", "Middle", "Right"]);
        assert_eq!(calculation.creepers.total, 13);
        assert_eq!(calculation.creepers.summary, "13 creepers (3 + 10)");
    }

    #[test]
    fn test_calculate_rejects_level_zero() {
        let err = calculate(57, 0).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_calculate_round_trips_through_json() {
        let calculation = calculate(57, 10).unwrap();
        let json = serde_json::to_string(&calculation).unwrap();
        let back: Calculation = serde_json::from_str(&json).unwrap();

        assert_eq!(back.seed, calculation.seed);
        assert_eq!(back.areas, calculation.areas);
    }
}
