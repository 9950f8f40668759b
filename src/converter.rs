//! Italian Number Conversion
//!
//! Converts cardinal numbers (0-1000) into their Italian word form and
//! produces the learner-facing grammar notes and hints:
//!
//! - direct table lookup for the irregular base forms
//! - vowel elision when 1 or 8 follows a tens word (ventuno, ventotto)
//! - orthographic accent when 3 closes a compound (ventitré)
//! - recursive composition for the hundreds range (centoventuno)

use std::collections::HashMap;

use crate::types::{MAX_WORD_NUMBER, NUMBER_TOO_LARGE};

/// 基础数词表：算法直接查表的不规则形式
const CARDINAL_TABLE: &[(u32, &str)] = &[
    (0, "zero"),
    (1, "uno"),
    (2, "due"),
    (3, "tre"),
    (4, "quattro"),
    (5, "cinque"),
    (6, "sei"),
    (7, "sette"),
    (8, "otto"),
    (9, "nove"),
    (10, "dieci"),
    (11, "undici"),
    (12, "dodici"),
    (13, "tredici"),
    (14, "quattordici"),
    (15, "quindici"),
    (16, "sedici"),
    (17, "diciassette"),
    (18, "diciotto"),
    (19, "diciannove"),
    (20, "venti"),
    (30, "trenta"),
    (40, "quaranta"),
    (50, "cinquanta"),
    (60, "sessanta"),
    (70, "settanta"),
    (80, "ottanta"),
    (90, "novanta"),
    (100, "cento"),
    (1000, "mille"),
];

/// 数词转换器
///
/// 无内部可变状态；所有方法都是输入的纯函数。
pub struct NumberConverter {
    cardinal: HashMap<u32, &'static str>,
}

impl NumberConverter {
    /// 构造转换器并校验数词表
    ///
    /// 算法会在不检查的情况下解引用基例键，因此构造时断言
    /// 0..=20、整十、100、1000 全部存在。
    pub fn new() -> Self {
        let cardinal: HashMap<u32, &'static str> = CARDINAL_TABLE.iter().copied().collect();
        for key in Self::required_keys() {
            assert!(
                cardinal.contains_key(&key),
                "cardinal table is missing the base form for {}",
                key
            );
        }
        Self { cardinal }
    }

    fn required_keys() -> impl Iterator<Item = u32> {
        (0..=20)
            .chain((30..=90).step_by(10))
            .chain([100, MAX_WORD_NUMBER])
    }

    /// 表内基例形式；键的存在性已在构造时校验
    fn base(&self, n: u32) -> &'static str {
        self.cardinal[&n]
    }

    // ========== 转换 ==========

    /// 将 `n` 转换为意大利语数词
    ///
    /// 定义域为 `0..=1000`；超出时返回占位串 [`NUMBER_TOO_LARGE`]，
    /// 保证界面永远有内容可显示。
    pub fn to_word(&self, n: u32) -> String {
        if let Some(word) = self.cardinal.get(&n) {
            return (*word).to_string();
        }
        if (21..=99).contains(&n) {
            return self.tens_range(n);
        }
        if (100..=999).contains(&n) {
            return self.hundreds_range(n);
        }
        NUMBER_TOO_LARGE.to_string()
    }

    fn tens_range(&self, n: u32) -> String {
        let tens = n / 10 * 10;
        let ones = n % 10;
        let tens_word = self.base(tens);

        if ones == 0 {
            return tens_word.to_string();
        }

        // 1 和 8 以元音开头，省略十位词尾的元音
        if ones == 1 || ones == 8 {
            let mut word = tens_word.to_string();
            word.pop();
            word.push_str(self.base(ones));
            return word;
        }

        // 词尾的 tre 带重音
        if ones == 3 {
            return format!("{}tré", tens_word);
        }

        format!("{}{}", tens_word, self.base(ones))
    }

    fn hundreds_range(&self, n: u32) -> String {
        let hundreds = n / 100;
        let remainder = n % 100;

        let prefix = if hundreds == 1 {
            self.base(100).to_string()
        } else {
            format!("{}{}", self.base(hundreds), self.base(100))
        };

        if remainder == 0 {
            return prefix;
        }

        format!("{}{}", prefix, self.to_word(remainder))
    }

    // ========== 语法说明 ==========

    /// 生成解释 `n` 的构词规则的说明文本
    ///
    /// 仅由 `n` 的算术性质与已算好的 `word` 推导，无额外状态；
    /// 不适用任何规则时返回 `None`。
    pub fn grammar_note(&self, n: u32, word: &str) -> Option<String> {
        if (11..=16).contains(&n) {
            return Some("Numbers 11-16 add \"dici\" after the root number.".to_string());
        }
        if (17..=19).contains(&n) {
            return Some("Numbers 17-19 add the root number after \"dici\".".to_string());
        }
        if n > 20 && n % 10 == 1 {
            let stem = drop_last_chars(word, 3);
            return Some(format!(
                "When adding 1 to tens, drop the final vowel ({} + uno → {}).",
                stem, word
            ));
        }
        if n > 20 && n % 10 == 8 {
            let stem = drop_last_chars(word, 4);
            return Some(format!(
                "When adding 8 to tens, drop the final vowel ({} + otto → {}).",
                stem, word
            ));
        }
        if n > 20 && n % 10 == 3 {
            return Some(format!("When adding 3 to tens, the e takes an accent ({}).", word));
        }
        None
    }

    // ========== 提示 ==========

    /// 生成部分遮盖的提示：保留前两个字符，其余以 `_` 代替
    ///
    /// 字符数与原词一致，例如 `hint("venti") == "ve___"`。
    pub fn hint(&self, word: &str) -> String {
        word.chars()
            .enumerate()
            .map(|(i, c)| if i < 2 { c } else { '_' })
            .collect()
    }
}

impl Default for NumberConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// 去掉末尾 `count` 个字符（按字符而非字节计）
fn drop_last_chars(word: &str, count: usize) -> String {
    let len = word.chars().count();
    word.chars().take(len.saturating_sub(count)).collect()
}
