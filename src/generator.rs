//! Random Number Generation
//!
//! Seedable uniform draws for challenge numbers and probability checks.
//! All random behavior in the engine flows through one [`NumberGenerator`]
//! so that a single seed makes an entire session reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// 随机数生成错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: u32, max: u32 },
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// 随机数生成器
///
/// 持有可播种的 ChaCha8 随机源；相同种子产生相同的抽取序列。
#[derive(Debug, Clone)]
pub struct NumberGenerator {
    rng: ChaCha8Rng,
}

impl NumberGenerator {
    /// 创建熵播种的生成器
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// 创建固定种子的生成器（用于可复现的测试）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// 在闭区间 `[min, max]` 内均匀抽取一个整数
    ///
    /// `min == max` 时恒返回该值；`min > max` 属于调用方错误，立即失败。
    pub fn generate(&mut self, min: u32, max: u32) -> GeneratorResult<u32> {
        if min > max {
            return Err(GeneratorError::InvalidRange { min, max });
        }
        Ok(self.rng.gen_range(min..=max))
    }

    /// 以给定概率返回 true
    ///
    /// `probability <= 0.0` 恒为 false，`probability >= 1.0` 恒为 true。
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }
}

impl Default for NumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ generate() 测试 ============

    #[test]
    fn test_generate_degenerate_range() {
        let mut generator = NumberGenerator::with_seed(1);
        for _ in 0..100 {
            assert_eq!(generator.generate(5, 5).unwrap(), 5);
        }
    }

    #[test]
    fn test_generate_stays_in_range() {
        let mut generator = NumberGenerator::with_seed(2);
        for _ in 0..1000 {
            let n = generator.generate(1, 10).unwrap();
            assert!((1..=10).contains(&n), "draw {} escaped [1, 10]", n);
        }
    }

    #[test]
    fn test_generate_invalid_range() {
        let mut generator = NumberGenerator::with_seed(3);
        assert_eq!(
            generator.generate(10, 1),
            Err(GeneratorError::InvalidRange { min: 10, max: 1 })
        );
    }

    #[test]
    fn test_generate_covers_whole_range() {
        // 足够多次抽取后区间两端都应出现过
        let mut generator = NumberGenerator::with_seed(4);
        let mut seen = [false; 11];
        for _ in 0..2000 {
            let n = generator.generate(1, 10).unwrap();
            seen[n as usize] = true;
        }
        for n in 1..=10 {
            assert!(seen[n], "value {} never drawn", n);
        }
    }

    // ============ 可复现性测试 ============

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = NumberGenerator::with_seed(42);
        let mut b = NumberGenerator::with_seed(42);
        for _ in 0..100 {
            assert_eq!(a.generate(1, 1000).unwrap(), b.generate(1, 1000).unwrap());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = NumberGenerator::with_seed(1);
        let mut b = NumberGenerator::with_seed(2);
        let draws_a: Vec<u32> = (0..50).map(|_| a.generate(1, 1000).unwrap()).collect();
        let draws_b: Vec<u32> = (0..50).map(|_| b.generate(1, 1000).unwrap()).collect();
        assert_ne!(draws_a, draws_b);
    }

    // ============ chance() 测试 ============

    #[test]
    fn test_chance_zero_never_hits() {
        let mut generator = NumberGenerator::with_seed(5);
        for _ in 0..1000 {
            assert!(!generator.chance(0.0));
        }
    }

    #[test]
    fn test_chance_one_always_hits() {
        let mut generator = NumberGenerator::with_seed(6);
        for _ in 0..1000 {
            assert!(generator.chance(1.0));
        }
    }

    #[test]
    fn test_chance_is_roughly_calibrated() {
        let mut generator = NumberGenerator::with_seed(7);
        let hits = (0..10_000).filter(|_| generator.chance(0.3)).count();
        assert!((2500..3500).contains(&hits), "0.3 probability hit {} of 10000", hits);
    }
}
