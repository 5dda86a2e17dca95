//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use game_core::PlayerId;

/// Everything the binary needs before a session can be built.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `spells.ron`.
    pub data_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub spells_path: Option<PathBuf>,
    /// Fixed game seed; a fresh one is drawn per duel when absent.
    pub seed: Option<u64>,
    pub ai_players: Vec<PlayerId>,
    /// Skip every presentation delay.
    pub fast: bool,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_DATA_DIR` - Directory with `config.toml` / `spells.ron`
    /// - `DUEL_CONFIG` - Game configuration TOML (overrides the data dir)
    /// - `DUEL_SPELLS` - Spell catalog RON (overrides the data dir)
    /// - `DUEL_SEED` - Game seed (default: random)
    /// - `DUEL_AI` - `none`, `p1`, `p2` or `both` (default: `p2`)
    /// - `DUEL_FAST` - Disable animation delays (default: false)
    /// - `DUEL_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self {
            data_dir: read_path("DUEL_DATA_DIR"),
            config_path: read_path("DUEL_CONFIG"),
            spells_path: read_path("DUEL_SPELLS"),
            seed: read_env::<u64>("DUEL_SEED"),
            ai_players: env::var("DUEL_AI")
                .ok()
                .and_then(|value| parse_ai_players(&value))
                .unwrap_or_else(|| vec![PlayerId::Two]),
            fast: read_env::<bool>("DUEL_FAST").unwrap_or(false),
            log_dir: read_path("DUEL_LOG_DIR"),
        }
    }
}

/// Parses the `DUEL_AI` selector. Unknown values yield `None`.
pub fn parse_ai_players(value: &str) -> Option<Vec<PlayerId>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" | "" => Some(Vec::new()),
        "p1" | "1" => Some(vec![PlayerId::One]),
        "p2" | "2" => Some(vec![PlayerId::Two]),
        "both" => Some(PlayerId::ALL.to_vec()),
        _ => None,
    }
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
