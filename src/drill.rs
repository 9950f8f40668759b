//! Drill Session Orchestration
//!
//! The session layer the UI talks to. Wires the session state manager to
//! the attempt log, persistence and pronunciation, and layers two behaviors
//! on top of the engine's single-attempt semantics:
//!
//! - the two-phase answer flow: a wrong first answer does not reveal the
//!   next challenge, it enters a correction phase where the same number
//!   must be retyped correctly before advancing
//! - the auto-advance after a correct answer, modeled as a cancellable
//!   scheduled task: any action that produces a new challenge first
//!   invalidates a pending advance, so a stale timer can never fire a
//!   transition after a manual action

use serde::{Deserialize, Serialize};

use crate::attempts::{AttemptLog, PerformanceMetrics};
use crate::generator::GeneratorResult;
use crate::session::SessionStateManager;
use crate::speech::{Speaker, SpeechConfig};
use crate::storage::{AttemptHistoryRepository, KeyValueStore};
use crate::types::{
    AttemptRecord, AttemptType, ChallengeState, Difficulty, AUTO_ADVANCE_DELAY_MS,
};

// ==================== Answer Flow Types ====================

/// 答题阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerPhase {
    /// 首次作答
    Initial,
    /// 订正模式：需重新输入正确答案才能前进
    Correction,
}

/// 待执行自动前进的句柄
///
/// 任何产生新挑战的动作都会使旧句柄过期。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken(u64);

/// 计划中的自动前进
///
/// UI 在 `delay_ms` 毫秒后回调 [`DrillSession::fire_advance`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub token: AdvanceToken,
    pub delay_ms: u64,
}

/// 一次提交的结果
#[derive(Debug, Clone)]
pub struct SubmitResult {
    pub is_correct: bool,
    /// 提交后所处的答题阶段
    pub phase: AnswerPhase,
    /// 答对时返回的自动前进任务
    pub advance: Option<ScheduledAdvance>,
}

// ==================== Drill Session ====================

/// 练习会话
///
/// 显式构造的会话对象：会话开始时创建（读入持久化历史并生成第一道题），
/// 会话结束即丢弃。按引用传递给需要它的层，不依赖任何全局状态。
pub struct DrillSession<S: KeyValueStore, P: Speaker> {
    manager: SessionStateManager,
    log: AttemptLog,
    history: AttemptHistoryRepository<S>,
    speaker: P,
    speech_config: SpeechConfig,
    phase: AnswerPhase,
    hint_shown: bool,
    advance_seq: u64,
    pending_advance: Option<AdvanceToken>,
}

impl<S: KeyValueStore, P: Speaker> DrillSession<S, P> {
    /// 创建会话：读入历史并生成第一道题
    pub fn new(manager: SessionStateManager, store: S, speaker: P) -> GeneratorResult<Self> {
        let history = AttemptHistoryRepository::new(store);
        let log = AttemptLog::from_records(history.load());
        let mut session = Self {
            manager,
            log,
            history,
            speaker,
            speech_config: SpeechConfig::default(),
            phase: AnswerPhase::Initial,
            hint_shown: false,
            advance_seq: 0,
            pending_advance: None,
        };
        session.new_challenge()?;
        Ok(session)
    }

    // ========== 挑战流转 ==========

    /// 生成新挑战
    ///
    /// 先取消任何待执行的自动前进，并重置答题阶段与提示标记。
    pub fn new_challenge(&mut self) -> GeneratorResult<ChallengeState> {
        self.cancel_pending_advance();
        self.phase = AnswerPhase::Initial;
        self.hint_shown = false;
        self.manager.generate_challenge()
    }

    /// 切换难度并立即生成新挑战
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> GeneratorResult<ChallengeState> {
        self.manager.set_difficulty(difficulty);
        self.new_challenge()
    }

    /// 提交答案
    ///
    /// 每次提交都会记入日志并写回存储。答对（无论首答还是订正）朗读
    /// 单词并安排自动前进；首答答错则进入订正模式并把数字加入复习队列。
    pub fn submit(&mut self, raw: &str, time_to_answer_ms: i64) -> SubmitResult {
        let attempt_type = match self.phase {
            AnswerPhase::Initial => AttemptType::Initial,
            AnswerPhase::Correction => AttemptType::Correction,
        };

        let is_correct = self.manager.submit_answer(raw);
        let (number, correct_answer) = {
            let challenge = self.manager.current_challenge();
            (challenge.current_number, challenge.correct_answer.clone())
        };

        let record = AttemptRecord::new(
            number,
            raw,
            &correct_answer,
            is_correct,
            time_to_answer_ms,
            self.hint_shown,
            attempt_type,
        );
        self.log.record(record);
        self.history.save(self.log.records());

        if is_correct {
            self.speak_current();
            let advance = self.schedule_advance();
            SubmitResult {
                is_correct: true,
                phase: self.phase,
                advance: Some(advance),
            }
        } else {
            if self.phase == AnswerPhase::Initial {
                self.manager.record_incorrect(number, &correct_answer);
                self.phase = AnswerPhase::Correction;
            }
            SubmitResult {
                is_correct: false,
                phase: self.phase,
                advance: None,
            }
        }
    }

    // ========== 自动前进 ==========

    fn schedule_advance(&mut self) -> ScheduledAdvance {
        self.advance_seq += 1;
        let token = AdvanceToken(self.advance_seq);
        self.pending_advance = Some(token);
        ScheduledAdvance {
            token,
            delay_ms: AUTO_ADVANCE_DELAY_MS,
        }
    }

    fn cancel_pending_advance(&mut self) {
        self.pending_advance = None;
    }

    /// 定时器到点后由 UI 回调
    ///
    /// 句柄仍有效则生成新挑战；已被取代的句柄不产生任何效果。
    pub fn fire_advance(&mut self, token: AdvanceToken) -> GeneratorResult<Option<ChallengeState>> {
        if self.pending_advance != Some(token) {
            return Ok(None);
        }
        Ok(Some(self.new_challenge()?))
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    // ========== 提示与发音 ==========

    /// 显示提示；该挑战此后的答题记录都标记为用过提示
    pub fn show_hint(&mut self) -> String {
        self.hint_shown = true;
        self.manager.hint()
    }

    /// 朗读当前期望答案；不可用时降级为警告日志
    pub fn speak_current(&mut self) {
        let text = self.manager.current_challenge().correct_answer.clone();
        if let Err(e) = self.speaker.speak(&text, &self.speech_config) {
            log::warn!("pronunciation unavailable: {}", e);
        }
    }

    // ========== 查询与维护 ==========

    pub fn current_challenge(&self) -> &ChallengeState {
        self.manager.current_challenge()
    }

    pub fn phase(&self) -> AnswerPhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.manager.difficulty()
    }

    pub fn review_count(&self) -> usize {
        self.manager.review_count()
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.log.metrics()
    }

    pub fn history(&self) -> &[AttemptRecord] {
        self.log.records()
    }

    /// 完整日志，供趋势与考试视角统计使用
    pub fn attempt_log(&self) -> &AttemptLog {
        &self.log
    }

    pub fn set_review_probability(&mut self, probability: f64) {
        self.manager.set_review_probability(probability);
    }

    /// 清空答题历史（内存与存储）；指标立即回到默认值
    pub fn clear_history(&mut self) {
        self.log.clear();
        self.history.clear();
    }
}
