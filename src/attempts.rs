//! Attempt Log & Performance Metrics
//!
//! Append-only record of answer attempts and the analytics derived from it.
//! Metrics are pure functions of the full log, recomputed on demand; the
//! log itself is never mutated in place, only appended to or bulk-cleared.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AttemptRecord, MOST_CHALLENGING_LIMIT, RECENT_WINDOW, TREND_WINDOW};

/// 多次作答数字排行的上限
pub const MULTIPLE_ATTEMPT_LIMIT: usize = 5;

// ==================== Derived Types ====================

/// 综合表现指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// 正确率 (0-100)
    pub accuracy: f64,
    /// 平均响应时间（毫秒，最近 [`RECENT_WINDOW`] 条）
    pub average_response_time_ms: f64,
    /// 总答题数
    pub total_attempts: u32,
    /// 正确答题数
    pub correct_attempts: u32,
    /// 错误答题数
    pub incorrect_attempts: u32,
    /// 错误频率最高的数字（至多 [`MOST_CHALLENGING_LIMIT`] 个）
    pub most_challenging: Vec<u32>,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            accuracy: 0.0,
            average_response_time_ms: 0.0,
            total_attempts: 0,
            correct_attempts: 0,
            incorrect_attempts: 0,
            most_challenging: Vec::new(),
        }
    }
}

/// 单日汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// 当日答题数
    pub attempts: u32,
    /// 当日正确数
    pub correct: u32,
    /// 当日正确率 (0-100)
    pub accuracy: f64,
}

/// 按数字的答题分布
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberBreakdown {
    pub number: u32,
    pub attempts: u32,
    pub correct: u32,
    pub incorrect: u32,
}

/// 考试视角统计：以数字为单位的首次作答表现
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamStats {
    /// 出现过的不同数字个数
    pub total_unique_numbers: u32,
    /// 首次作答即正确的比例 (0-100)
    pub first_attempt_success_rate: f64,
    /// 平均每个数字的作答次数
    pub average_attempts_per_number: f64,
    /// 首次即正确的数字个数
    pub perfect_numbers: u32,
    /// 首次答错的数字个数
    pub challenging_numbers: u32,
}

// ==================== Attempt Log ====================

/// 答题日志
///
/// 记录只追加、不修改；清空是唯一的删除方式。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttemptLog {
    records: Vec<AttemptRecord>,
}

impl AttemptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已持久化的记录恢复日志
    pub fn from_records(records: Vec<AttemptRecord>) -> Self {
        Self { records }
    }

    /// 追加一条记录
    pub fn record(&mut self, record: AttemptRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[AttemptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 清空日志；指标随之回到默认值
    pub fn clear(&mut self) {
        self.records.clear();
    }

    // ========== 综合指标 ==========

    /// 由完整日志推导综合指标；空日志返回全零
    pub fn metrics(&self) -> PerformanceMetrics {
        let total = self.records.len();
        let correct = self.records.iter().filter(|r| r.is_correct).count();
        let incorrect = total - correct;

        let accuracy = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64 * 100.0
        };

        let recent = &self.records[total.saturating_sub(RECENT_WINDOW)..];
        let average_response_time_ms = if recent.is_empty() {
            0.0
        } else {
            recent.iter().map(|r| r.time_to_answer_ms as f64).sum::<f64>() / recent.len() as f64
        };

        PerformanceMetrics {
            accuracy,
            average_response_time_ms,
            total_attempts: total as u32,
            correct_attempts: correct as u32,
            incorrect_attempts: incorrect as u32,
            most_challenging: self.most_challenging(),
        }
    }

    /// 错误频率最高的数字；并列按首次出错的先后
    fn most_challenging(&self) -> Vec<u32> {
        let mut counts: Vec<(u32, u32)> = Vec::new();
        for record in self.records.iter().filter(|r| !r.is_correct) {
            match counts.iter_mut().find(|(number, _)| *number == record.number) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.number, 1)),
            }
        }
        // 稳定排序保持并列项的先后
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(MOST_CHALLENGING_LIMIT)
            .map(|(number, _)| number)
            .collect()
    }

    // ========== 趋势分析 ==========

    /// 最近 [`TREND_WINDOW`] 条的正确率；数据不足时为 None
    pub fn recent_accuracy(&self) -> Option<f64> {
        if self.records.len() < TREND_WINDOW {
            return None;
        }
        let recent = &self.records[self.records.len() - TREND_WINDOW..];
        Some(share_correct(recent) * 100.0)
    }

    /// 正确率变化：最近一窗相对前一窗的百分比变化
    ///
    /// 需要至少两窗数据；前一窗正确率为零时无法定义，返回 None。
    pub fn improvement(&self) -> Option<f64> {
        let (older, newer) = self.trend_windows()?;
        let older_rate = share_correct(older);
        let newer_rate = share_correct(newer);
        if older_rate == 0.0 {
            return None;
        }
        Some((newer_rate - older_rate) / older_rate * 100.0)
    }

    /// 响应时间变化：正值表示最近一窗更快
    pub fn response_time_trend(&self) -> Option<f64> {
        let (older, newer) = self.trend_windows()?;
        let older_time = mean_time(older);
        let newer_time = mean_time(newer);
        if older_time == 0.0 {
            return None;
        }
        Some((older_time - newer_time) / older_time * 100.0)
    }

    fn trend_windows(&self) -> Option<(&[AttemptRecord], &[AttemptRecord])> {
        let len = self.records.len();
        if len < 2 * TREND_WINDOW {
            return None;
        }
        let older = &self.records[len - 2 * TREND_WINDOW..len - TREND_WINDOW];
        let newer = &self.records[len - TREND_WINDOW..];
        Some((older, newer))
    }

    // ========== 日汇总 ==========

    /// 指定日历日的汇总
    pub fn stats_for_day(&self, day: NaiveDate) -> DailySummary {
        let mut attempts = 0u32;
        let mut correct = 0u32;
        for record in &self.records {
            if record.timestamp.date_naive() == day {
                attempts += 1;
                if record.is_correct {
                    correct += 1;
                }
            }
        }
        let accuracy = if attempts == 0 {
            0.0
        } else {
            correct as f64 / attempts as f64 * 100.0
        };
        DailySummary {
            attempts,
            correct,
            accuracy,
        }
    }

    /// 今日汇总
    pub fn today_stats(&self) -> DailySummary {
        self.stats_for_day(Utc::now().date_naive())
    }

    // ========== 按数字统计 ==========

    /// 每个数字的答题分布，按首次出现顺序
    pub fn number_breakdown(&self) -> Vec<NumberBreakdown> {
        let mut rows: Vec<NumberBreakdown> = Vec::new();
        for record in &self.records {
            let idx = match rows.iter().position(|row| row.number == record.number) {
                Some(idx) => idx,
                None => {
                    rows.push(NumberBreakdown {
                        number: record.number,
                        attempts: 0,
                        correct: 0,
                        incorrect: 0,
                    });
                    rows.len() - 1
                }
            };
            let row = &mut rows[idx];
            row.attempts += 1;
            if record.is_correct {
                row.correct += 1;
            } else {
                row.incorrect += 1;
            }
        }
        rows
    }

    /// 被作答多次的数字，按次数从高到低，至多 [`MULTIPLE_ATTEMPT_LIMIT`] 个
    pub fn multiple_attempt_numbers(&self) -> Vec<NumberBreakdown> {
        let mut rows: Vec<NumberBreakdown> = self
            .number_breakdown()
            .into_iter()
            .filter(|row| row.attempts > 1)
            .collect();
        rows.sort_by(|a, b| b.attempts.cmp(&a.attempts));
        rows.truncate(MULTIPLE_ATTEMPT_LIMIT);
        rows
    }

    /// 考试视角统计；空日志返回默认值
    pub fn exam_stats(&self) -> ExamStats {
        let mut groups: Vec<(u32, Vec<&AttemptRecord>)> = Vec::new();
        for record in &self.records {
            match groups.iter_mut().find(|(number, _)| *number == record.number) {
                Some((_, list)) => list.push(record),
                None => groups.push((record.number, vec![record])),
            }
        }

        let total = groups.len() as u32;
        if total == 0 {
            return ExamStats::default();
        }

        let mut perfect = 0u32;
        let mut attempts_sum = 0usize;
        for (_, list) in &groups {
            attempts_sum += list.len();
            if let Some(first) = list.iter().min_by_key(|r| r.timestamp) {
                if first.is_correct {
                    perfect += 1;
                }
            }
        }

        ExamStats {
            total_unique_numbers: total,
            first_attempt_success_rate: perfect as f64 / total as f64 * 100.0,
            average_attempts_per_number: attempts_sum as f64 / total as f64,
            perfect_numbers: perfect,
            challenging_numbers: total - perfect,
        }
    }
}

fn share_correct(records: &[AttemptRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().filter(|r| r.is_correct).count() as f64 / records.len() as f64
}

fn mean_time(records: &[AttemptRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.time_to_answer_ms as f64).sum::<f64>() / records.len() as f64
}
