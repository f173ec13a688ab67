mod common;

use common::{fixture, init_test_env};
use pp_processor::{
    config::{ProcessorConfig, ValidationPolicy},
    engine::RosuEngine,
    model::{
        calculate_performances,
        structures::{
            mode::Mode,
            mods::Mods,
            score_params::{HitCounts, ScoreParams}
        },
        BatchProcessor, ProcessorError
    },
    utils::test_utils::{generate_scores, write_beatmap, StubEngine}
};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_repeated_batches_serialize_identically() {
    init_test_env();
    let dir = tempdir().unwrap();
    let path = write_beatmap(dir.path(), 300);
    let scores = generate_scores(40, 7);

    let first = calculate_performances(StubEngine::new(), &path, &scores).unwrap();
    let second = calculate_performances(StubEngine::new(), &path, &scores).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_results_match_single_score_batches() {
    init_test_env();
    let dir = tempdir().unwrap();
    let path = write_beatmap(dir.path(), 120);
    let scores = generate_scores(25, 11);
    let processor = BatchProcessor::new(StubEngine::new(), ProcessorConfig::default());

    let batch = processor.compute_batch(&path, &scores).unwrap();

    assert_eq!(batch.len(), scores.len());
    for (score, result) in scores.iter().zip(&batch) {
        let single = processor.compute_batch(&path, std::slice::from_ref(score)).unwrap();
        assert_eq!(&single[0], result);
    }
}

#[test]
fn test_missing_beatmap_fails_whole_batch() {
    init_test_env();
    let scores = generate_scores(3, 1);

    let result = calculate_performances(StubEngine::new(), Path::new("/no/such/beatmap.osu"), &scores);

    assert!(matches!(result, Err(ProcessorError::BeatmapLoad(_))));
}

#[test]
fn test_ambiguous_score_rejected_unless_lenient() {
    init_test_env();
    let dir = tempdir().unwrap();
    let path = write_beatmap(dir.path(), 100);
    let mut scores = generate_scores(4, 3);
    scores.push(ScoreParams {
        mode: Mode::VanillaOsu,
        mods: Mods::NOMOD,
        combo: None,
        acc: None,
        hits: None
    });

    let strict = BatchProcessor::new(StubEngine::new(), ProcessorConfig::default());
    let result = strict.compute_batch(&path, &scores);
    assert!(matches!(result, Err(ProcessorError::InvalidScoreParams { index: 4, .. })));

    let lenient = BatchProcessor::new(
        StubEngine::new(),
        ProcessorConfig {
            validation: ValidationPolicy::Lenient,
            ..Default::default()
        }
    );
    let results = lenient.compute_batch(&path, &scores).unwrap();
    assert_eq!(results.len(), 5);
}

#[test]
fn test_rosu_batch_on_fixture() {
    init_test_env();
    let path = fixture("simple.osu");
    let scores = vec![
        ScoreParams::with_accuracy(Mode::VanillaOsu, Mods::NOMOD, 100.0),
        ScoreParams::with_accuracy(Mode::VanillaOsu, Mods::NIGHTCORE, 100.0),
        ScoreParams::with_accuracy(Mode::VanillaOsu, Mods::NIGHTCORE | Mods::DOUBLETIME, 100.0),
        ScoreParams::with_hits(
            Mode::VanillaTaiko,
            Mods::NOMOD,
            HitCounts {
                nmiss: Some(0),
                ..Default::default()
            }
        ),
        ScoreParams::with_accuracy(Mode::VanillaCatch, Mods::HARDROCK, 97.5),
        ScoreParams::with_accuracy(Mode::VanillaMania, Mods::NOMOD, 95.0)
    ];

    let results = calculate_performances(RosuEngine::new(), &path, &scores).unwrap();

    assert_eq!(results.len(), scores.len());
    for result in &results {
        assert!(result.performance.pp.is_finite());
        assert!(result.performance.pp >= 0.0);
        assert!(result.difficulty.stars > 0.0);
    }

    // NC implies DT
    assert_eq!(results[1], results[2]);
    assert!(results[1].difficulty.stars > results[0].difficulty.stars);

    assert!(results[0].difficulty.aim.is_some());
    assert!(results[3].difficulty.stamina.is_some());
    assert!(results[3].difficulty.aim.is_none());
}

#[test]
fn test_rosu_batch_is_deterministic() {
    init_test_env();
    let path = fixture("simple.osu");
    let scores = vec![
        ScoreParams::with_accuracy(Mode::VanillaOsu, Mods::HIDDEN | Mods::HARDROCK, 98.2).combo(40),
        ScoreParams::with_accuracy(Mode::RelaxOsu, Mods::RELAX, 99.0)
    ];

    let first = calculate_performances(RosuEngine::new(), &path, &scores).unwrap();
    let second = calculate_performances(RosuEngine::new(), &path, &scores).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
