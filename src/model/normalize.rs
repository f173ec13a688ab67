use crate::model::structures::{mods::Mods, score_params::ScoreParams};

/// The engine only knows DoubleTime, NightCore shares its timing.
pub fn normalize_mods(mods: Mods) -> Mods {
    if mods.contains(Mods::NIGHTCORE) {
        mods | Mods::DOUBLETIME
    } else {
        mods
    }
}

impl ScoreParams {
    /// Copy of this score with engine-ready mods. `self` is left untouched.
    pub fn normalized(&self) -> ScoreParams {
        ScoreParams {
            mods: normalize_mods(self.mods),
            ..self.clone()
        }
    }
}
