#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Once
};

static INIT: Once = Once::new();

/// Initialize test environment with warn-level logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
            .with_test_writer()
            .try_init();
    });
}

/// Path of a beatmap fixture in `tests/data`
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}
