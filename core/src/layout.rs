//! Tunnel layout derivation from generator draws
//!
//! Reduces the three raw draws for a level to the four per-area branch
//! directions and the area-one creeper count. Each area has its own mapping
//! from reduced roll to direction; areas one and three share the third
//! draw's roll, so the whole layout consumes exactly three draws.

use crate::{compute_sequence, Sequence, DRAW_COUNT};

/// Number of tunnel areas in a level
pub const AREA_COUNT: usize = 4;

/// Creepers always present in area one's first part
const AREA_ONE_FIRST_PART: u8 = 3;

/// Base creepers in area one's second part, before the roll bonus
const AREA_ONE_SECOND_PART_BASE: u8 = 2;

/// Area-one second-part bonus, indexed by the first roll, per direction
const AREA_ONE_BONUS_LEFT: [u8; 3] = [4, 0, 8];
const AREA_ONE_BONUS_MIDDLE: [u8; 3] = [0, 8, 4];
const AREA_ONE_BONUS_RIGHT: [u8; 3] = [8, 4, 0];

/// Branch direction of one tunnel area
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Middle,
    Right,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Middle => "Middle",
            Direction::Right => "Right",
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creeper count for an area, split into its two parts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreeperCount {
    pub total: u8,
    pub first_part: u8,
    pub second_part: u8,
}

/// Complete layout of one tunnel level
///
/// `rolls` holds the mod-reduced draws in draw order: the first draw mod 3,
/// the second mod 2, the third mod 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TunnelLayout {
    pub seed: u32,
    pub draws: [u32; DRAW_COUNT],
    pub rolls: [u8; DRAW_COUNT],
    pub areas: [Direction; AREA_COUNT],
}

impl TunnelLayout {
    /// Compute the layout for a player and level
    pub fn generate(player_id: u32, level: u32) -> Self {
        Self::from_sequence(compute_sequence(player_id, level))
    }

    /// Map an already-drawn sequence to its layout
    pub fn from_sequence(sequence: Sequence) -> Self {
        let rolls = [
            (sequence.draws[0] % 3) as u8,
            (sequence.draws[1] % 2) as u8,
            (sequence.draws[2] % 3) as u8,
        ];

        let areas = [
            area_one(rolls[2]),
            area_two(rolls[0]),
            area_three(rolls[2]),
            area_four(rolls[1]),
        ];

        Self {
            seed: sequence.seed,
            draws: sequence.draws,
            rolls,
            areas,
        }
    }

    /// Creeper count for area one; the other areas carry no derived count
    pub fn creeper_count(&self) -> CreeperCount {
        let bonus = match self.areas[0] {
            Direction::Left => AREA_ONE_BONUS_LEFT,
            Direction::Middle => AREA_ONE_BONUS_MIDDLE,
            Direction::Right => AREA_ONE_BONUS_RIGHT,
        };

        let second_part = AREA_ONE_SECOND_PART_BASE + bonus[self.rolls[0] as usize];
        CreeperCount {
            total: AREA_ONE_FIRST_PART + second_part,
            first_part: AREA_ONE_FIRST_PART,
            second_part,
        }
    }
}

fn area_one(roll: u8) -> Direction {
    match roll {
        1 => Direction::Left,
        0 => Direction::Middle,
        _ => Direction::Right,
    }
}

fn area_two(roll: u8) -> Direction {
    match roll {
        0 => Direction::Left,
        1 => Direction::Middle,
        _ => Direction::Right,
    }
}

fn area_three(roll: u8) -> Direction {
    match roll {
        2 => Direction::Left,
        0 => Direction::Middle,
        _ => Direction::Right,
    }
}

fn area_four(roll: u8) -> Direction {
    if roll == 0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_mapping_tables() {
        assert_eq!(area_one(0), Direction::Middle);
        assert_eq!(area_one(1), Direction::Left);
        assert_eq!(area_one(2), Direction::Right);

        assert_eq!(area_two(0), Direction::Left);
        assert_eq!(area_two(1), Direction::Middle);
        assert_eq!(area_two(2), Direction::Right);

        assert_eq!(area_three(0), Direction::Middle);
        assert_eq!(area_three(1), Direction::Right);
        assert_eq!(area_three(2), Direction::Left);

        assert_eq!(area_four(0), Direction::Left);
        assert_eq!(area_four(1), Direction::Right);
    }

    #[test]
    fn test_golden_layout_57_10() {
        let layout = TunnelLayout::generate(57, 10);

        assert_eq!(layout.seed, 570);
        assert_eq!(layout.draws, [1617897028, 1992620429, 2109519711]);
        assert_eq!(layout.rolls, [1, 1, 0]);
        assert_eq!(
            layout.areas,
            [
                Direction::Middle,
                Direction::Middle,
                Direction::Middle,
                Direction::Right,
            ]
        );
    }

    #[test]
    fn test_golden_creeper_count_57_10() {
        let layout = TunnelLayout::generate(57, 10);
        let creepers = layout.creeper_count();

        assert_eq!(creepers.first_part, 3);
        assert_eq!(creepers.second_part, 10);
        assert_eq!(creepers.total, 13);
    }

    #[test]
    fn test_creeper_bonus_follows_area_one_direction() {
        // A left-branching area one with first roll 0 gets the 4-creeper bonus
        let layout = TunnelLayout {
            seed: 0,
            draws: [0; DRAW_COUNT],
            rolls: [0, 0, 1],
            areas: [
                Direction::Left,
                Direction::Left,
                Direction::Right,
                Direction::Left,
            ],
        };

        let creepers = layout.creeper_count();
        assert_eq!(creepers.second_part, 2 + 4);
        assert_eq!(creepers.total, 3 + 2 + 4);
    }

    #[test]
    fn test_determinism() {
        let a = TunnelLayout::generate(123456, 42);
        let b = TunnelLayout::generate(123456, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::Left.as_str(), "Left");
        assert_eq!(Direction::Middle.as_str(), "Middle");
        assert_eq!(Direction::Right.as_str(), "Right");
    }
}
