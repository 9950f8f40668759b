//! Session State
//!
//! Orchestrates the generator, converter and review queue into the single
//! current challenge, and scores incoming answers. One instance per drill
//! session; constructed explicitly and passed by reference to whatever
//! layer needs it.

use crate::converter::NumberConverter;
use crate::generator::{GeneratorResult, NumberGenerator};
use crate::review::ReviewQueue;
use crate::types::{ChallengeState, Difficulty, ReviewItem, DEFAULT_REVIEW_PROBABILITY};

/// 会话状态管理器
///
/// 持有当前挑战与复习队列；挑战状态在每次生成时整体替换。
pub struct SessionStateManager {
    generator: NumberGenerator,
    converter: NumberConverter,
    review_queue: ReviewQueue,
    difficulty: Difficulty,
    review_probability: f64,
    state: ChallengeState,
}

impl SessionStateManager {
    /// 创建熵播种的会话
    pub fn new() -> Self {
        Self::with_generator(NumberGenerator::new())
    }

    /// 创建固定种子的会话（用于可复现的测试）
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(NumberGenerator::with_seed(seed))
    }

    fn with_generator(generator: NumberGenerator) -> Self {
        Self {
            generator,
            converter: NumberConverter::new(),
            review_queue: ReviewQueue::new(),
            difficulty: Difficulty::default(),
            review_probability: DEFAULT_REVIEW_PROBABILITY,
            state: ChallengeState::default(),
        }
    }

    // ========== 挑战生成 ==========

    /// 生成新挑战并整体替换当前状态
    ///
    /// 复习命中时取出最久未见的复习项（无论随后答对与否都先移除），
    /// 否则在当前难度区间内抽取新数字。
    pub fn generate_challenge(&mut self) -> GeneratorResult<ChallengeState> {
        if self
            .review_queue
            .should_serve(self.review_probability, &mut self.generator)
        {
            if let Some(item) = self.review_queue.next().cloned() {
                self.review_queue.remove(item.number);
                let grammar_note = self.converter.grammar_note(item.number, &item.correct_answer);
                self.state = ChallengeState {
                    current_number: item.number,
                    correct_answer: item.correct_answer,
                    is_review_mode: true,
                    grammar_note,
                    attempt_count: 0,
                };
                return Ok(self.state.clone());
            }
        }

        let range = self.difficulty.range();
        let number = self.generator.generate(range.min, range.max)?;
        let correct_answer = self.converter.to_word(number);
        let grammar_note = self.converter.grammar_note(number, &correct_answer);
        self.state = ChallengeState {
            current_number: number,
            correct_answer,
            is_review_mode: false,
            grammar_note,
            attempt_count: 0,
        };
        Ok(self.state.clone())
    }

    /// 切换难度；只影响后续生成，不会自行重生成挑战
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// 调整复习命中概率，截断到 `[0, 1]`
    pub fn set_review_probability(&mut self, probability: f64) {
        self.review_probability = probability.clamp(0.0, 1.0);
    }

    // ========== 判分 ==========

    /// 判定一次提交
    ///
    /// 比较 `raw.trim().to_lowercase()` 与期望答案的小写形式，
    /// 严格相等，无模糊匹配；同时递增当前挑战的提交计数。
    pub fn submit_answer(&mut self, raw: &str) -> bool {
        self.state.attempt_count += 1;
        raw.trim().to_lowercase() == self.state.correct_answer.to_lowercase()
    }

    /// 将答错的数字加入复习队列（时间戳为当下）
    pub fn record_incorrect(&mut self, number: u32, correct_answer: &str) {
        self.review_queue.add(ReviewItem::new(number, correct_answer));
    }

    // ========== 查询 ==========

    pub fn current_challenge(&self) -> &ChallengeState {
        &self.state
    }

    pub fn review_count(&self) -> usize {
        self.review_queue.count()
    }

    /// 当前期望答案的遮盖提示
    pub fn hint(&self) -> String {
        self.converter.hint(&self.state.correct_answer)
    }
}

impl Default for SessionStateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ 挑战生成测试 ============

    #[test]
    fn test_easy_challenges_stay_in_range() {
        let mut manager = SessionStateManager::with_seed(1);
        for _ in 0..100 {
            let state = manager.generate_challenge().unwrap();
            assert!(
                (1..=20).contains(&state.current_number),
                "easy draw {} escaped [1, 20]",
                state.current_number
            );
            assert!(!state.is_review_mode);
        }
    }

    #[test]
    fn test_medium_and_hard_ranges() {
        let mut manager = SessionStateManager::with_seed(2);
        manager.set_difficulty(Difficulty::Medium);
        for _ in 0..100 {
            let state = manager.generate_challenge().unwrap();
            assert!((1..=100).contains(&state.current_number));
        }
        manager.set_difficulty(Difficulty::Hard);
        for _ in 0..100 {
            let state = manager.generate_challenge().unwrap();
            assert!((1..=1000).contains(&state.current_number));
        }
    }

    #[test]
    fn test_challenge_answer_matches_converter() {
        let mut manager = SessionStateManager::with_seed(3);
        let converter = NumberConverter::new();
        for _ in 0..50 {
            let state = manager.generate_challenge().unwrap();
            assert_eq!(state.correct_answer, converter.to_word(state.current_number));
        }
    }

    #[test]
    fn test_set_difficulty_does_not_regenerate() {
        let mut manager = SessionStateManager::with_seed(4);
        let before = manager.generate_challenge().unwrap();
        manager.set_difficulty(Difficulty::Hard);
        assert_eq!(manager.current_challenge(), &before);
    }

    #[test]
    fn test_generate_resets_attempt_count() {
        let mut manager = SessionStateManager::with_seed(5);
        manager.generate_challenge().unwrap();
        manager.submit_answer("sbagliato");
        manager.submit_answer("sbagliato");
        assert_eq!(manager.current_challenge().attempt_count, 2);
        manager.generate_challenge().unwrap();
        assert_eq!(manager.current_challenge().attempt_count, 0);
    }

    // ============ 判分测试 ============

    #[test]
    fn test_submit_answer_normalizes_case_and_whitespace() {
        let mut manager = SessionStateManager::with_seed(6);
        let state = manager.generate_challenge().unwrap();
        let sloppy = format!("  {}  ", state.correct_answer.to_uppercase());
        assert!(manager.submit_answer(&sloppy));
    }

    #[test]
    fn test_submit_answer_rejects_wrong_word() {
        let mut manager = SessionStateManager::with_seed(7);
        manager.generate_challenge().unwrap();
        assert!(!manager.submit_answer("parola sbagliata"));
    }

    #[test]
    fn test_submit_answer_is_exact_after_normalization() {
        let mut manager = SessionStateManager::with_seed(8);
        let state = manager.generate_challenge().unwrap();
        // 近似拼写不算对
        let truncated: String = state
            .correct_answer
            .chars()
            .take(state.correct_answer.chars().count().saturating_sub(1))
            .collect();
        assert!(!manager.submit_answer(&truncated));
    }

    // ============ 复习流程测试 ============

    #[test]
    fn test_incorrect_answer_enters_review_queue() {
        let mut manager = SessionStateManager::with_seed(9);
        let state = manager.generate_challenge().unwrap();
        assert!(!manager.submit_answer("sbagliato"));
        manager.record_incorrect(state.current_number, &state.correct_answer);
        assert_eq!(manager.review_count(), 1);
    }

    #[test]
    fn test_review_challenge_round_trip() {
        let mut manager = SessionStateManager::with_seed(10);
        let missed = manager.generate_challenge().unwrap();
        manager.record_incorrect(missed.current_number, &missed.correct_answer);

        // 强制复习命中
        manager.set_review_probability(1.0);
        let review = manager.generate_challenge().unwrap();

        assert!(review.is_review_mode);
        assert_eq!(review.current_number, missed.current_number);
        assert_eq!(review.correct_answer, missed.correct_answer);
        // 取出即移除，与随后答对与否无关
        assert_eq!(manager.review_count(), 0);
    }

    #[test]
    fn test_zero_probability_never_serves_review() {
        let mut manager = SessionStateManager::with_seed(11);
        let missed = manager.generate_challenge().unwrap();
        manager.record_incorrect(missed.current_number, &missed.correct_answer);

        manager.set_review_probability(0.0);
        for _ in 0..50 {
            let state = manager.generate_challenge().unwrap();
            assert!(!state.is_review_mode);
        }
        assert_eq!(manager.review_count(), 1);
    }

    #[test]
    fn test_review_mode_carries_grammar_note() {
        let mut manager = SessionStateManager::with_seed(12);
        manager.record_incorrect(21, "ventuno");
        manager.set_review_probability(1.0);
        let review = manager.generate_challenge().unwrap();
        assert_eq!(review.current_number, 21);
        assert!(review.grammar_note.unwrap().contains("drop the final vowel"));
    }

    // ============ hint() 测试 ============

    #[test]
    fn test_hint_for_current_challenge() {
        let mut manager = SessionStateManager::with_seed(13);
        let state = manager.generate_challenge().unwrap();
        let hint = manager.hint();
        assert_eq!(hint.chars().count(), state.correct_answer.chars().count());
        let reveal: String = state.correct_answer.chars().take(2).collect();
        assert!(hint.starts_with(&reveal));
    }
}
