// ABOUTME: Rule tables for grammar, particle, and correction analysis with Vietnamese descriptions
// ABOUTME: Each table is a list of regex sources applied per sentence plus its scoring ceiling and penalty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Rule Table Configuration
//!
//! Patterns are regular expressions evaluated against one sentence at a time,
//! with trailing sentence punctuation removed, so `$` anchors at the sentence end.

use serde::{Deserialize, Serialize};

/// Location nouns used by the particle rules
const PLACES: &str = "図書館|学校|公園|家|部屋|会社|大学|教室|レストラン|喫茶店|デパート|駅|店|うち";

/// Vehicles used by the particle rules
const VEHICLES: &str = "電車|バス|車|自転車|飛行機|タクシー|新幹線|地下鉄";

/// Words marking a past time frame
const PAST_TIME: &str = "昨日|先週|先月|去年|昨年|おととい|昨夜|この前";


/// Words marking a future time frame
const FUTURE_TIME: &str = "明日|来週|来月|来年|あさって|今度";

/// い-adjective stems whose past tense must be 〜かった
const I_ADJECTIVES: &str = "楽し|高|安|大き|小さ|おいし|美味し|暑|寒|面白|忙し|難し|新し|古|良|悪|早|遅|長|短|広|狭|多|少な|暖か|涼し|怖|嬉し|悲し|寂し";

/// な-adjectives that take です without な
const NA_ADJECTIVES: &str = "好き|嫌い|静か|元気|有名|便利|不便|大切|大事|簡単|上手|下手|親切|暇|丈夫|きれい|綺麗|特別|残念|心配";

const DOUBLED_PARTICLE: &str = "Trợ từ bị lặp lại (ví dụ: をを). Chỉ dùng một trợ từ.";

/// A single detection rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Regular expression source
    pub pattern: String,
    /// Vietnamese description reported when the pattern matches
    pub description: String,
    /// Sentences matching this expression are exempt from the rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<String>,
}

impl PatternRule {
    /// Build a rule from pattern and description
    #[must_use]
    pub fn new(pattern: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            description: description.into(),
            unless: None,
        }
    }

    /// Exempt sentences matching `exception`
    #[must_use]
    pub fn unless(mut self, exception: impl Into<String>) -> Self {
        self.unless = Some(exception.into());
        self
    }
}

/// Sentences the past-time rules leave alone: a time frame opened with から,
/// or an ongoing state in 〜ています
fn past_time_exceptions() -> String {
    format!("({PAST_TIME})から|[てで]い(ます|ません)[。！？!?]?$")
}

/// A rule table with its scoring curve
///
/// `score = ceiling - penalty_per_error * distinct_errors`, clamped to `[0, ceiling]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableConfig {
    /// Score with no errors
    pub ceiling: f64,
    /// Points removed per distinct error description
    pub penalty_per_error: f64,
    /// Detection rules in reporting order
    pub rules: Vec<PatternRule>,
}

impl RuleTableConfig {
    /// Default grammar rule table
    #[must_use]
    pub fn grammar_defaults() -> Self {
        Self {
            ceiling: 100.0,
            penalty_per_error: 15.0,
            rules: vec![
                PatternRule::new(
                    format!("({PAST_TIME}).*(ます|ません)$"),
                    "Sai thì: câu có từ chỉ thời gian quá khứ (昨日, 先週...) nhưng động từ lại ở thì hiện tại. Hãy dùng 〜ました / 〜ませんでした.",
                )
                .unless(past_time_exceptions()),
                PatternRule::new(
                    format!("({FUTURE_TIME}).*(ました|ませんでした)$"),
                    "Sai thì: câu nói về tương lai (明日, 来週...) nhưng động từ lại ở thì quá khứ. Hãy dùng 〜ます.",
                ),
                PatternRule::new(
                    "たいですから",
                    "「〜たいですから」 không tự nhiên. Khi nêu lý do cho mong muốn, hãy dùng 「〜たいので、」.",
                ),
                PatternRule::new(
                    "(る|く|ぐ|う|つ|む|ぶ|ぬ)ます",
                    "Chia động từ sai: không gắn ます trực tiếp vào thể từ điển. Hãy dùng thể ます (ví dụ: 行く → 行きます).",
                ),
                PatternRule::new(
                    format!("({I_ADJECTIVES})いでした"),
                    "Tính từ đuôi い ở thì quá khứ phải chia thành 〜かったです, không dùng 〜いでした.",
                ),
                PatternRule::new(
                    format!("({NA_ADJECTIVES})な(です|でした)"),
                    "Tính từ đuôi な đứng cuối câu không cần な: dùng 〜です (ví dụ: 静かです).",
                ),
            ],
        }
    }

    /// Default particle rule table
    #[must_use]
    pub fn particle_defaults() -> Self {
        Self {
            ceiling: 100.0,
            penalty_per_error: 20.0,
            rules: vec![
                PatternRule::new(
                    format!("({PLACES})に(勉強し|働き|働い|食べま|食べて|食べた|遊び|遊ん|読み|読ん|書き|書い|泳ぎ|泳い|買い|買っ|飲み|飲ん|練習し)([^に]|$)"),
                    "Trợ từ sai: nơi diễn ra hành động dùng で, không dùng に (ví dụ: 図書館で勉強します).",
                ),
                PatternRule::new(
                    format!("({PLACES}|ここ|そこ|あそこ)で(います|いました|いる|あります|ありました|ある)"),
                    "Trợ từ sai: nơi tồn tại (いる/ある) dùng に, không dùng で (ví dụ: 部屋にいます).",
                ),
                PatternRule::new(
                    "を(話せ|読め|書け|泳げ|食べられ|分か|わか|でき|出来)",
                    "Trợ từ sai: động từ khả năng và 分かる/できる đi với が, không dùng を (ví dụ: 日本語が話せます).",
                ),
                PatternRule::new(
                    "を(好き|嫌い|上手|下手|欲しい|ほしい)",
                    "Trợ từ sai: 好き/嫌い/上手/下手/欲しい đi với が, không dùng を (ví dụ: 音楽が好きです).",
                ),
                PatternRule::new(
                    "(誰|だれ|何|なに|どこ|いつ|どれ|どちら|どなた)は([^じやずなたしからこれん]|$)",
                    "Trợ từ sai: từ để hỏi làm chủ ngữ đi với が, không dùng は (ví dụ: 誰が来ましたか).",
                ),
                PatternRule::new(
                    format!("({VEHICLES})(を|に)(行|来|帰)"),
                    "Trợ từ sai: phương tiện đi lại dùng で (ví dụ: 電車で行きます).",
                ),
                PatternRule::new(
                    "(学校|会社|日本|東京|家|うち|駅|大学|病院|銀行|デパート|スーパー)を(行|来|帰)",
                    "Trợ từ sai: nơi đến dùng に hoặc へ, không dùng を (ví dụ: 学校へ行きます).",
                ),
                PatternRule::new(
                    format!("({VEHICLES})を乗"),
                    "Trợ từ sai: 乗る đi với に (ví dụ: バスに乗ります).",
                ),
                PatternRule::new(
                    "(をを|がが|にに|でで|へへ|までまで|よりより)",
                    DOUBLED_PARTICLE,
                ),
                PatternRule::new("(とと|やや|からから)", DOUBLED_PARTICLE)
                    .unless(r"おとと|ととの|ややこし|やや\p{Han}|からから(に|だ|で|の|と)"),
            ],
        }
    }
}

/// A correction rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRule {
    /// Regular expression source
    pub pattern: String,
    /// Replacement, may reference capture groups as `$1`, `${name}`
    pub replacement: String,
    /// Vietnamese explanation of the rewrite
    pub explanation_vi: String,
    /// Sentences matching this expression are left untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<String>,
}

impl CorrectionRule {
    /// Build a rewrite
    #[must_use]
    pub fn new(
        pattern: impl Into<String>,
        replacement: impl Into<String>,
        explanation_vi: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            explanation_vi: explanation_vi.into(),
            unless: None,
        }
    }

    /// Skip sentences matching `exception`
    #[must_use]
    pub fn unless(mut self, exception: impl Into<String>) -> Self {
        self.unless = Some(exception.into());
        self
    }
}

/// Sentence correction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionConfig {
    /// Rewrites applied in order, each on the output of the previous one
    pub rules: Vec<CorrectionRule>,
    /// Explanation returned when no rule applies
    pub fallback_explanation_vi: String,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                CorrectionRule::new(
                    "たいですから、?",
                    "たいので、",
                    "「〜たいですから」 nghe không tự nhiên. Khi nêu lý do cho mong muốn của mình, người Nhật thường nói 「〜たいので、」.",
                ),
                CorrectionRule::new(
                    format!("^(?P<head>.*({PAST_TIME}).*)ます(?P<tail>[。！？!?]?)$"),
                    "${head}ました${tail}",
                    "Câu nói về quá khứ nên động từ phải chia ở thì quá khứ: 〜ます → 〜ました.",
                )
                .unless(past_time_exceptions()),
                CorrectionRule::new(
                    "を(?P<verb>話せ|読め|書け|泳げ|分か|わか|でき|出来)",
                    "が${verb}",
                    "Động từ khả năng và 分かる/できる đi với trợ từ が, không dùng を.",
                ),
                CorrectionRule::new(
                    "を(?P<word>好き|嫌い|上手|下手|欲しい|ほしい)",
                    "が${word}",
                    "好き/嫌い/上手/下手/欲しい đi với trợ từ が, không dùng を.",
                ),
                CorrectionRule::new(
                    format!("(?P<place>{PLACES})に(?P<verb>勉強し|働き|働い|遊び|遊ん|読み|読ん|練習し)(?P<next>[^に]|$)"),
                    "${place}で${verb}${next}",
                    "Nơi diễn ra hành động dùng trợ từ で, không dùng に.",
                ),
                CorrectionRule::new(
                    format!("(?P<adj>{NA_ADJECTIVES})な(?P<copula>です|でした)"),
                    "${adj}${copula}",
                    "Tính từ đuôi な đứng cuối câu không cần な trước です.",
                ),
                CorrectionRule::new(
                    format!("(?P<stem>{I_ADJECTIVES})いでした"),
                    "${stem}かったです",
                    "Tính từ đuôi い ở thì quá khứ chia thành 〜かったです, không dùng 〜いでした.",
                ),
            ],
            fallback_explanation_vi: "Câu này đã đúng ngữ pháp cơ bản.".to_owned(),
        }
    }
}
