use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr}
};

/// Legacy osu! mod bitflags.
///
/// See <https://github.com/ppy/osu-api/wiki#mods>
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Mods(pub u32);

impl Mods {
    pub const NOMOD: Mods = Mods(0);
    pub const NOFAIL: Mods = Mods(1 << 0);
    pub const EASY: Mods = Mods(1 << 1);
    pub const TOUCHSCREEN: Mods = Mods(1 << 2);
    pub const HIDDEN: Mods = Mods(1 << 3);
    pub const HARDROCK: Mods = Mods(1 << 4);
    pub const SUDDENDEATH: Mods = Mods(1 << 5);
    pub const DOUBLETIME: Mods = Mods(1 << 6);
    pub const RELAX: Mods = Mods(1 << 7);
    pub const HALFTIME: Mods = Mods(1 << 8);
    pub const NIGHTCORE: Mods = Mods(1 << 9);
    pub const FLASHLIGHT: Mods = Mods(1 << 10);
    pub const AUTOPLAY: Mods = Mods(1 << 11);
    pub const SPUNOUT: Mods = Mods(1 << 12);
    pub const AUTOPILOT: Mods = Mods(1 << 13);
    pub const PERFECT: Mods = Mods(1 << 14);
    pub const KEY4: Mods = Mods(1 << 15);
    pub const KEY5: Mods = Mods(1 << 16);
    pub const KEY6: Mods = Mods(1 << 17);
    pub const KEY7: Mods = Mods(1 << 18);
    pub const KEY8: Mods = Mods(1 << 19);
    pub const FADEIN: Mods = Mods(1 << 20);
    pub const RANDOM: Mods = Mods(1 << 21);
    pub const CINEMA: Mods = Mods(1 << 22);
    pub const TARGET: Mods = Mods(1 << 23);
    pub const KEY9: Mods = Mods(1 << 24);
    pub const KEYCOOP: Mods = Mods(1 << 25);
    pub const KEY1: Mods = Mods(1 << 26);
    pub const KEY3: Mods = Mods(1 << 27);
    pub const KEY2: Mods = Mods(1 << 28);
    pub const SCOREV2: Mods = Mods(1 << 29);
    pub const MIRROR: Mods = Mods(1 << 30);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit of `other` is set.
    pub const fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Mods {
    type Output = Mods;

    fn bitor(self, rhs: Self) -> Self::Output {
        Mods(self.0 | rhs.0)
    }
}

impl BitAnd for Mods {
    type Output = Mods;

    fn bitand(self, rhs: Self) -> Self::Output {
        Mods(self.0 & rhs.0)
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
