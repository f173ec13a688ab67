use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use strum_macros::EnumIter;
use thiserror::Error;

use super::ruleset::Ruleset;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown game mode: {0}")]
pub struct ModeError(pub i32);

/// Game mode as stored by the score backend. Relax and autopilot
/// scores are tracked separately from vanilla ones, so they get their own values.
#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum Mode {
    VanillaOsu = 0,
    VanillaTaiko = 1,
    VanillaCatch = 2,
    VanillaMania = 3,
    RelaxOsu = 4,
    RelaxTaiko = 5,
    RelaxCatch = 6,
    AutopilotOsu = 8
}

impl Mode {
    pub fn ruleset(self) -> Ruleset {
        match self {
            Mode::VanillaOsu | Mode::RelaxOsu | Mode::AutopilotOsu => Ruleset::Osu,
            Mode::VanillaTaiko | Mode::RelaxTaiko => Ruleset::Taiko,
            Mode::VanillaCatch | Mode::RelaxCatch => Ruleset::Catch,
            Mode::VanillaMania => Ruleset::Mania
        }
    }

    pub fn is_relax(self) -> bool {
        matches!(self, Mode::RelaxOsu | Mode::RelaxTaiko | Mode::RelaxCatch)
    }

    pub fn is_autopilot(self) -> bool {
        self == Mode::AutopilotOsu
    }
}

impl TryFrom<i32> for Mode {
    type Error = ModeError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            x if x == Mode::VanillaOsu as i32 => Ok(Mode::VanillaOsu),
            x if x == Mode::VanillaTaiko as i32 => Ok(Mode::VanillaTaiko),
            x if x == Mode::VanillaCatch as i32 => Ok(Mode::VanillaCatch),
            x if x == Mode::VanillaMania as i32 => Ok(Mode::VanillaMania),
            x if x == Mode::RelaxOsu as i32 => Ok(Mode::RelaxOsu),
            x if x == Mode::RelaxTaiko as i32 => Ok(Mode::RelaxTaiko),
            x if x == Mode::RelaxCatch as i32 => Ok(Mode::RelaxCatch),
            x if x == Mode::AutopilotOsu as i32 => Ok(Mode::AutopilotOsu),
            _ => Err(ModeError(v))
        }
    }
}
