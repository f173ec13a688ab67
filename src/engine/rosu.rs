use std::{io, path::Path};

use rosu_pp::{any::PerformanceAttributes, model::mode::GameMode, Beatmap, Performance};
use tracing::debug;

use super::{EngineError, RatingEngine, RawRating};
use crate::model::structures::{mods::Mods, ruleset::Ruleset, score_params::ScoreParams};

/// [`RatingEngine`] backed by `rosu-pp`.
#[derive(Debug, Clone, Default)]
pub struct RosuEngine {
    lazer: bool
}

impl RosuEngine {
    /// Engine calculating with stable (non-lazer) scoring rules
    pub fn new() -> RosuEngine {
        RosuEngine { lazer: false }
    }

    pub fn lazer(mut self, lazer: bool) -> RosuEngine {
        self.lazer = lazer;
        self
    }
}

impl RatingEngine for RosuEngine {
    type Beatmap = Beatmap;

    fn load_beatmap(&self, path: &Path) -> Result<Beatmap, EngineError> {
        let map = Beatmap::from_path(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => EngineError::BeatmapRead {
                path: path.to_path_buf(),
                source
            },
            _ => EngineError::BeatmapParse {
                path: path.to_path_buf(),
                reason: source.to_string()
            }
        })?;

        if map.hit_objects.is_empty() {
            return Err(EngineError::BeatmapParse {
                path: path.to_path_buf(),
                reason: "beatmap contains no hit objects".to_string()
            });
        }

        map.check_suspicion().map_err(|err| EngineError::BeatmapParse {
            path: path.to_path_buf(),
            reason: err.to_string()
        })?;

        debug!(path = %path.display(), n_objects = map.hit_objects.len(), "Loaded beatmap");

        Ok(map)
    }

    fn compute_rating(&self, beatmap: &Beatmap, score: &ScoreParams) -> Result<RawRating, EngineError> {
        let target = game_mode(score.mode.ruleset());

        let mut calc = Performance::new(beatmap).try_mode(target).unwrap_or_else(|calc| {
            debug!(mode = ?target, "Beatmap cannot be converted, using its own mode");
            calc
        });

        calc = calc.mods(engine_mods(score).bits()).lazer(self.lazer);

        if let Some(combo) = score.combo {
            calc = calc.combo(combo);
        }

        if let Some(acc) = score.acc {
            calc = calc.accuracy(acc);
        }

        if let Some(hits) = score.hits {
            if let Some(n300) = hits.n300 {
                calc = calc.n300(n300);
            }
            if let Some(n100) = hits.n100 {
                calc = calc.n100(n100);
            }
            if let Some(n50) = hits.n50 {
                calc = calc.n50(n50);
            }
            if let Some(n_geki) = hits.ngeki {
                calc = calc.n_geki(n_geki);
            }
            if let Some(n_katu) = hits.nkatu {
                calc = calc.n_katu(n_katu);
            }
            if let Some(misses) = hits.nmiss {
                calc = calc.misses(misses);
            }
        }

        Ok(raw_rating(calc.calculate()))
    }
}

/// Relax and autopilot modes imply their mod even when the score's mods lack it
fn engine_mods(score: &ScoreParams) -> Mods {
    if score.mode.is_relax() {
        score.mods | Mods::RELAX
    } else if score.mode.is_autopilot() {
        score.mods | Mods::AUTOPILOT
    } else {
        score.mods
    }
}

fn game_mode(ruleset: Ruleset) -> GameMode {
    match ruleset {
        Ruleset::Osu => GameMode::Osu,
        Ruleset::Taiko => GameMode::Taiko,
        Ruleset::Catch => GameMode::Catch,
        Ruleset::Mania => GameMode::Mania
    }
}

/// Flattens the mode-specific attributes. Components a mode
/// does not calculate stay `None`.
fn raw_rating(attrs: PerformanceAttributes) -> RawRating {
    match attrs {
        PerformanceAttributes::Osu(attrs) => RawRating {
            pp: attrs.pp,
            pp_acc: Some(attrs.pp_acc),
            pp_aim: Some(attrs.pp_aim),
            pp_speed: Some(attrs.pp_speed),
            pp_flashlight: Some(attrs.pp_flashlight),
            effective_miss_count: Some(attrs.effective_miss_count),
            stars: attrs.difficulty.stars,
            aim: Some(attrs.difficulty.aim),
            speed: Some(attrs.difficulty.speed),
            flashlight: Some(attrs.difficulty.flashlight),
            slider_factor: Some(attrs.difficulty.slider_factor),
            speed_note_count: Some(attrs.difficulty.speed_note_count),
            ..Default::default()
        },
        PerformanceAttributes::Taiko(attrs) => RawRating {
            pp: attrs.pp,
            pp_acc: Some(attrs.pp_acc),
            effective_miss_count: Some(attrs.effective_miss_count),
            pp_difficulty: Some(attrs.pp_difficulty),
            stars: attrs.difficulty.stars,
            stamina: Some(attrs.difficulty.stamina),
            color: Some(attrs.difficulty.color),
            rhythm: Some(attrs.difficulty.rhythm),
            ..Default::default()
        },
        PerformanceAttributes::Catch(attrs) => RawRating {
            pp: attrs.pp,
            stars: attrs.difficulty.stars,
            ..Default::default()
        },
        PerformanceAttributes::Mania(attrs) => RawRating {
            pp: attrs.pp,
            pp_difficulty: Some(attrs.pp_difficulty),
            stars: attrs.difficulty.stars,
            ..Default::default()
        }
    }
}
