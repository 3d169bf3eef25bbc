//! 探索結果の JSON 表現

use std::fmt::Display;
use std::time::Duration;

use scns_core::{ChildSummary, SearchReport};
use serde::{Deserialize, Serialize};

/// ルートの子ノード 1 つ分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChildLog {
    #[serde(rename = "move")]
    pub move_usi: String,
    pub visits: u32,
    pub stair: i32,
    pub x: i32,
    pub minimax: i32,
    pub terminal: bool,
}

/// 探索 1 回分の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportLog {
    pub bestmove: String,
    pub iterations: u64,
    pub nodes: u64,
    pub max_depth: u32,
    pub elapsed_ms: u64,
    pub vmin: i32,
    pub vmax: i32,
    pub root_value: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildLog>,
}

impl ReportLog {
    pub fn from_report<M: Display>(report: &SearchReport<M>) -> Self {
        ReportLog {
            bestmove: report.best_move.to_string(),
            iterations: report.iterations,
            nodes: report.move_count,
            max_depth: report.max_depth,
            elapsed_ms: duration_to_millis(report.elapsed),
            vmin: report.vmin,
            vmax: report.vmax,
            root_value: report.root_value,
            children: report.children.iter().map(ChildLog::from_summary).collect(),
        }
    }
}

impl ChildLog {
    fn from_summary<M: Display>(c: &ChildSummary<M>) -> Self {
        ChildLog {
            move_usi: c.mv.to_string(),
            visits: c.visits,
            stair: c.stair,
            x: c.x,
            minimax: c.minimax,
            terminal: c.terminal,
        }
    }
}

pub fn duration_to_millis(d: Duration) -> u64 {
    d.as_millis().min(u128::from(u64::MAX)) as u64
}
