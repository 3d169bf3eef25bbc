use anyhow::{Result, bail};
use log::{debug, info};
use scns_core::{BestMove, Color, Evaluator, Position as _, Searcher};
use scns_dobutsu::Position;

use super::types::GameOutcome;
use crate::report::ReportLog;

/// ゲーム設定
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    /// これを超えたら引き分け
    pub max_plies: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { max_plies: 200 }
    }
}

/// 1手ごとに呼ばれるイベント
#[derive(Debug, Clone)]
pub struct MoveEvent {
    pub ply: u32,
    pub side: Color,
    pub sfen_before: String,
    /// 指し手（投了なら `resign`）
    pub move_usi: String,
    pub search: ReportLog,
}

/// 対局結果
#[derive(Debug, Clone)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub reason: String,
    pub plies: u32,
}

/// 1局を実行する。先手・後手とも `searcher` が指す。
///
/// - `start_pos`: 開始局面
/// - `config`: ゲーム設定
/// - `on_move`: 1手ごとに呼ばれるコールバック
pub fn run_game<E>(
    searcher: &Searcher<E>,
    start_pos: &Position,
    config: &GameConfig,
    on_move: &mut dyn FnMut(&MoveEvent),
) -> Result<GameResult>
where
    E: Evaluator<Position>,
{
    let mut pos = start_pos.clone();
    let mut outcome = GameOutcome::InProgress;
    let mut outcome_reason = "max_plies".to_string();
    let mut plies_played = 0u32;

    for ply_idx in 0..config.max_plies {
        plies_played = ply_idx + 1;
        let side = pos.side_to_move();
        let sfen_before = pos.to_sfen();
        let report = searcher.search(&pos);

        let move_usi = report.best_move.to_string();
        match report.best_move {
            BestMove::Resign => {
                outcome = GameOutcome::win_for(!side);
                outcome_reason = if pos.is_try(!side) { "try" } else { "resign" }.to_string();
            }
            BestMove::Move(mv) => {
                if !pos.legal_moves().contains(&mv) {
                    bail!("search returned an illegal move {mv} in {sfen_before}");
                }
                pos.do_move(mv);
                debug!("ply {plies_played}: {} {mv}", side);
            }
        }

        let event = MoveEvent {
            ply: plies_played,
            side,
            sfen_before,
            move_usi,
            search: ReportLog::from_report(&report),
        };
        on_move(&event);

        if outcome != GameOutcome::InProgress {
            break;
        }
    }

    if outcome == GameOutcome::InProgress {
        outcome = GameOutcome::Draw;
        outcome_reason = "max_plies".to_string();
    }
    info!(
        "game over: {} ({}) after {} plies",
        outcome.label(),
        outcome_reason,
        plies_played
    );

    Ok(GameResult {
        outcome,
        reason: outcome_reason,
        plies: plies_played,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scns_core::SearchConfig;
    use scns_dobutsu::MaterialEvaluator;

    fn searcher() -> Searcher<MaterialEvaluator> {
        let config = SearchConfig {
            max_iterations: Some(30),
            ..SearchConfig::default()
        };
        Searcher::new(config, MaterialEvaluator).unwrap()
    }

    #[test]
    fn test_game_stops_at_max_plies() {
        let mut events = Vec::new();
        let result = run_game(
            &searcher(),
            &Position::startpos(),
            &GameConfig { max_plies: 3 },
            &mut |e| events.push(e.clone()),
        )
        .unwrap();
        if result.outcome == GameOutcome::Draw {
            assert_eq!(result.plies, 3);
            assert_eq!(result.reason, "max_plies");
        }
        assert_eq!(events.len() as u32, result.plies);
        assert_eq!(events[0].side, Color::Black);
        assert_eq!(events[0].sfen_before, scns_dobutsu::SFEN_STARTPOS);
    }

    #[test]
    fn test_finished_position_is_a_loss_by_try() {
        let pos = Position::from_sfen("L2/3/2l/3 w - 1").unwrap();
        let mut events = Vec::new();
        let result = run_game(&searcher(), &pos, &GameConfig::default(), &mut |e| {
            events.push(e.move_usi.clone())
        })
        .unwrap();
        assert_eq!(result.outcome, GameOutcome::BlackWin);
        assert_eq!(result.reason, "try");
        assert_eq!(result.plies, 1);
        assert_eq!(events, vec!["resign".to_string()]);
    }
}
