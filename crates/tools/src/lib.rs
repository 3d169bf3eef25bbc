//! SCNS 探索のコマンドラインツール群の共通部分
//!
//! - `config`: TOML 設定ファイルの読み込みとコマンドライン引数による上書き
//! - `report`: 探索結果の JSON 表現
//! - `selfplay`: 同じ探索器同士の対局ループ

pub mod config;
pub mod report;
pub mod selfplay;
