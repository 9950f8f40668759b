//! # numeri-algo - 意大利语数词练习核心引擎
//!
//! 本 crate 提供纯 Rust 实现的练习引擎:
//!
//! - **Number Conversion** - 基数词到意大利语单词的确定性转换，含语法说明与提示
//! - **Review Queue** - 答错数字的按概率复现队列
//! - **Session State** - 难度、挑战生成与判分的会话状态
//! - **Attempt Analytics** - 答题日志与表现指标
//!
//! ## 设计理念
//!
//! 本 crate 的设计目标:
//! - **纯 Rust** - 无 UI 依赖，可在任何 Rust 项目中使用
//! - **可复现** - 随机源可播种，测试可强制任意走向
//! - **显式会话** - 无全局状态，会话对象显式构造、显式销毁
//! - **充分测试** - 所有组件都有完整的单元测试
//!
//! ## 模块结构
//!
//! - [`converter`] - 数词转换 (查表、元音省略、重音、递归组合)
//! - [`generator`] - 随机数生成 (可播种的均匀抽取与概率判定)
//! - [`review`] - 复习队列 (最久未见优先、概率复现)
//! - [`session`] - 会话状态 (挑战生成、难度、判分)
//! - [`attempts`] - 答题日志与表现指标
//! - [`drill`] - 练习会话编排 (两阶段作答、自动前进、持久化接线)
//! - [`storage`] - 键值存储契约与历史仓储
//! - [`speech`] - 发音服务契约
//! - [`types`] - 公共类型和常量
//!
//! ## 使用示例
//!
//! ```rust
//! use numeri_algo::{DrillSession, MemoryStore, NullSpeaker, SessionStateManager};
//!
//! let manager = SessionStateManager::with_seed(7);
//! let mut session = DrillSession::new(manager, MemoryStore::new(), NullSpeaker).unwrap();
//!
//! let challenge = session.current_challenge().clone();
//! let result = session.submit(&challenge.correct_answer, 1200);
//! assert!(result.is_correct);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod attempts;
pub mod converter;
pub mod drill;
pub mod generator;
pub mod review;
pub mod session;
pub mod speech;
pub mod storage;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

/// 重新导出答题日志与指标
pub use attempts::{
    AttemptLog, DailySummary, ExamStats, NumberBreakdown, PerformanceMetrics,
    MULTIPLE_ATTEMPT_LIMIT,
};

/// 重新导出数词转换器
pub use converter::NumberConverter;

/// 重新导出练习会话编排
pub use drill::{AdvanceToken, AnswerPhase, DrillSession, ScheduledAdvance, SubmitResult};

/// 重新导出随机数生成器
pub use generator::{GeneratorError, GeneratorResult, NumberGenerator};

/// 重新导出复习队列
pub use review::ReviewQueue;

/// 重新导出会话状态管理器
pub use session::SessionStateManager;

/// 重新导出发音服务契约
pub use speech::{NullSpeaker, Speaker, SpeechConfig, SpeechError, ITALIAN_LANGUAGE_TAG};

/// 重新导出存储契约与历史仓储
pub use storage::{
    AttemptHistoryRepository, KeyValueStore, MemoryStore, StorageError, StorageResult, HISTORY_KEY,
};
