//! Process-wide settings read once from the environment.

use std::sync::OnceLock;

fn parse_env_u64(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static DEFAULT_SEED: OnceLock<Option<u64>> = OnceLock::new();

/// Seed used when a request carries none (`QRSTYLE_SEED`)
pub fn default_seed() -> Option<u64> {
    *DEFAULT_SEED.get_or_init(|| parse_env_u64("QRSTYLE_SEED"))
}

static PARALLEL_MIN_MODULES: OnceLock<usize> = OnceLock::new();

/// Dark-module count at which the module pass goes parallel
/// (`QRSTYLE_PARALLEL_MIN_MODULES`)
pub fn parallel_min_modules() -> usize {
    *PARALLEL_MIN_MODULES.get_or_init(|| parse_env_usize("QRSTYLE_PARALLEL_MIN_MODULES", 256))
}
