use crate::{
    engine::{EngineError, RatingEngine, RawRating},
    model::structures::{
        mode::Mode,
        mods::Mods,
        ruleset::Ruleset,
        score_params::{HitCounts, ScoreParams}
    }
};
use rand::{seq::IndexedRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Duration
};
use strum::IntoEnumIterator;

const STUB_HEADER: &str = "stub beatmap";

/// Beatmap understood by [`StubEngine`]: just an object count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubBeatmap {
    pub n_objects: u32
}

/// Deterministic stand-in for a real rating engine.
///
/// Beatmap files are plain text (see [`write_beatmap`]). Ratings are simple
/// functions of the object count, mods, accuracy and combo. A combo above the
/// object count yields a NaN pp, like real engines do for inconsistent input.
#[derive(Debug, Default)]
pub struct StubEngine {
    pp_override: Option<f64>,
    failing_mods: Option<Mods>,
    load_delay: Option<Duration>,
    loads: AtomicUsize,
    computations: AtomicUsize
}

impl StubEngine {
    pub fn new() -> StubEngine {
        StubEngine::default()
    }

    /// Every computation returns this raw pp
    pub fn with_pp(mut self, pp: f64) -> StubEngine {
        self.pp_override = Some(pp);
        self
    }

    /// Scores with all of these mods fail with [`EngineError::Calculation`]
    pub fn failing_on(mut self, mods: Mods) -> StubEngine {
        self.failing_mods = Some(mods);
        self
    }

    /// Sleep while loading the beatmap
    pub fn with_delay(mut self, delay: Duration) -> StubEngine {
        self.load_delay = Some(delay);
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::SeqCst)
    }
}

impl RatingEngine for StubEngine {
    type Beatmap = StubBeatmap;

    fn load_beatmap(&self, path: &Path) -> Result<StubBeatmap, EngineError> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.load_delay {
            thread::sleep(delay);
        }

        let content = fs::read_to_string(path).map_err(|source| EngineError::BeatmapRead {
            path: path.to_path_buf(),
            source
        })?;

        let parse_error = |reason: &str| EngineError::BeatmapParse {
            path: path.to_path_buf(),
            reason: reason.to_string()
        };

        let mut lines = content.lines();
        if lines.next() != Some(STUB_HEADER) {
            return Err(parse_error("missing stub header"));
        }

        let n_objects = lines
            .next()
            .and_then(|line| line.strip_prefix("objects: "))
            .and_then(|n| n.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| parse_error("invalid object count"))?;

        Ok(StubBeatmap { n_objects })
    }

    fn compute_rating(&self, beatmap: &StubBeatmap, score: &ScoreParams) -> Result<RawRating, EngineError> {
        self.computations.fetch_add(1, Ordering::SeqCst);

        if let Some(failing) = self.failing_mods {
            if score.mods.contains(failing) {
                return Err(EngineError::Calculation(format!("mods {} are not supported", score.mods)));
            }
        }

        let max_combo = beatmap.n_objects as f64;
        let mut stars = max_combo.sqrt() * 0.25;

        // Only DoubleTime is recognized, NightCore alone has no effect
        if score.mods.contains(Mods::DOUBLETIME) {
            stars *= 1.4;
        } else if score.mods.contains(Mods::HALFTIME) {
            stars *= 0.75;
        }
        if score.mods.contains(Mods::HARDROCK) {
            stars *= 1.08;
        }

        let acc = score
            .acc
            .or_else(|| score.hits.map(|hits| hit_count_accuracy(&hits, beatmap.n_objects)))
            .unwrap_or(100.0)
            / 100.0;

        let combo_scaling = match score.combo {
            Some(combo) if combo as f64 > max_combo => f64::NAN,
            Some(combo) => combo as f64 / max_combo,
            None => 1.0
        };

        // Breakdown stays finite even when the total is not
        let base = stars.powi(2) * 8.0 * acc.powi(4);
        let pp = self.pp_override.unwrap_or(base * combo_scaling);

        let raw = match score.mode.ruleset() {
            Ruleset::Osu => RawRating {
                pp,
                pp_acc: Some(base * 0.3),
                pp_aim: Some(base * 0.4),
                pp_speed: Some(base * 0.3),
                pp_flashlight: Some(0.0),
                effective_miss_count: Some(score.hits.and_then(|h| h.nmiss).unwrap_or(0) as f64),
                stars,
                aim: Some(stars * 0.5),
                speed: Some(stars * 0.45),
                flashlight: Some(0.0),
                slider_factor: Some(1.0),
                speed_note_count: Some(max_combo * 0.8),
                ..Default::default()
            },
            Ruleset::Taiko => RawRating {
                pp,
                pp_acc: Some(base * 0.35),
                pp_difficulty: Some(base * 0.65),
                effective_miss_count: Some(0.0),
                stars,
                stamina: Some(stars * 0.3),
                color: Some(stars * 0.3),
                rhythm: Some(stars * 0.2),
                peak: Some(stars * 0.2),
                ..Default::default()
            },
            Ruleset::Catch => RawRating {
                pp,
                stars,
                ..Default::default()
            },
            Ruleset::Mania => RawRating {
                pp,
                pp_difficulty: Some(base),
                stars,
                ..Default::default()
            }
        };

        Ok(raw)
    }
}

fn hit_count_accuracy(hits: &HitCounts, n_objects: u32) -> f64 {
    let n300 = hits.n300.unwrap_or(0) as f64;
    let n100 = hits.n100.unwrap_or(0) as f64;
    let n50 = hits.n50.unwrap_or(0) as f64;
    let total = n300 + n100 + n50 + hits.nmiss.unwrap_or(0) as f64;
    let total = if total > 0.0 { total } else { n_objects as f64 };

    (300.0 * n300 + 100.0 * n100 + 50.0 * n50) / (300.0 * total) * 100.0
}

/// Writes a [`StubEngine`] beatmap with `n_objects` objects into `dir`
pub fn write_beatmap(dir: &Path, n_objects: u32) -> PathBuf {
    let path = dir.join(format!("stub_{n_objects}.osu"));
    fs::write(&path, format!("{STUB_HEADER}\nobjects: {n_objects}\n")).expect("Expected writable test directory");

    path
}

/// Generates valid scores (exactly one of accuracy / hit counts) from a seeded RNG
pub fn generate_scores(n: usize, seed: u64) -> Vec<ScoreParams> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let modes = Mode::iter().collect::<Vec<_>>();
    let mod_pool = [
        Mods::HIDDEN,
        Mods::HARDROCK,
        Mods::DOUBLETIME,
        Mods::NIGHTCORE,
        Mods::HALFTIME,
        Mods::FLASHLIGHT,
        Mods::EASY
    ];

    (0..n)
        .map(|_| {
            let mode = *modes.choose(&mut rng).unwrap();
            let mods = mod_pool
                .iter()
                .filter(|_| rng.random_bool(0.25))
                .fold(Mods::NOMOD, |acc, m| acc | *m);

            let mut score = if rng.random_bool(0.5) {
                ScoreParams::with_accuracy(mode, mods, rng.random_range(80.0..=100.0))
            } else {
                let hits = HitCounts {
                    n300: Some(rng.random_range(50..=100)),
                    n100: Some(rng.random_range(0..=10)),
                    n50: Some(rng.random_range(0..=5)),
                    nmiss: Some(rng.random_range(0..=3)),
                    ..Default::default()
                };
                ScoreParams::with_hits(mode, mods, hits)
            };

            if rng.random_bool(0.5) {
                score.combo = Some(rng.random_range(1..=50));
            }

            score
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate_scores, write_beatmap, StubBeatmap, StubEngine};
    use crate::{
        engine::{EngineError, RatingEngine},
        model::{
            structures::{mode::Mode, mods::Mods, score_params::ScoreParams},
            validation::validate_score
        }
    };
    use std::fs;

    #[test]
    fn test_generated_scores_are_valid_and_seeded() {
        let scores = generate_scores(100, 42);

        assert_eq!(scores.len(), 100);
        assert!(scores.iter().all(|s| validate_score(s).is_ok()));
        assert_eq!(scores, generate_scores(100, 42));
    }

    #[test]
    fn test_stub_beatmap_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_beatmap(dir.path(), 321);

        let beatmap = StubEngine::new().load_beatmap(&path).unwrap();

        assert_eq!(beatmap, StubBeatmap { n_objects: 321 });
    }

    #[test]
    fn test_stub_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.osu");
        fs::write(&path, "osu file format v14\n").unwrap();

        let result = StubEngine::new().load_beatmap(&path);

        assert!(matches!(result, Err(EngineError::BeatmapParse { .. })));
    }

    #[test]
    fn test_stub_combo_overflow_is_nan() {
        let engine = StubEngine::new();
        let score = ScoreParams::with_accuracy(Mode::VanillaOsu, Mods::NOMOD, 100.0).combo(11);

        let raw = engine.compute_rating(&StubBeatmap { n_objects: 10 }, &score).unwrap();

        assert!(raw.pp.is_nan());
    }
}
