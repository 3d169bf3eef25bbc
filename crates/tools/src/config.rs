//! 探索設定の読み込み
//!
//! 設定ファイル（TOML）の各キーは `SearchConfig` のフィールド名と同じ。
//! 省略したキーは既定値になり、未知のキーはエラーになる。
//!
//! ```toml
//! time_budget_ms = 500
//! p_max = 1
//! d_max = 1
//! delta = 0.187
//! vmax_scan = "legacy"
//! max_iterations = 1000
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use scns_core::SearchConfig;

/// コマンドライン引数による上書き
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub time_ms: Option<u64>,
    pub iterations: Option<u64>,
}

/// TOML 文字列から設定を読む
pub fn parse_config(text: &str) -> Result<SearchConfig> {
    let config: SearchConfig = toml::from_str(text).context("failed to parse search config")?;
    config.validate()?;
    Ok(config)
}

/// 設定ファイル（省略時は既定値）を読み、上書きを適用する
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<SearchConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            parse_config(&text).with_context(|| format!("invalid config file: {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    if let Some(ms) = overrides.time_ms {
        config.time_budget_ms = ms;
    }
    if let Some(n) = overrides.iterations {
        config.max_iterations = Some(n);
    }
    log::debug!("search config: {config:?}");
    Ok(config)
}
