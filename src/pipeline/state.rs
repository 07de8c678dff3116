use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// 分析模式，统一控制各阶段的篇幅与检索量
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Fast,
    Deep,
}

impl Mode {
    /// 仅当输入（忽略大小写）恰好为`deep`时进入深度模式，其余一律归一为快速模式
    pub fn normalize(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("deep") {
            Mode::Deep
        } else {
            Mode::Fast
        }
    }

    /// 每次检索线索请求的条数上限
    pub fn hint_limit(&self) -> usize {
        match self {
            Mode::Fast => 5,
            Mode::Deep => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fast => "fast",
            Mode::Deep => "deep",
        }
    }
}

// 配置文件与序列化结果中的模式同样经过归一化
impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Mode::normalize(&raw))
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 各阶段独占写入的状态键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Market,
    Competitors,
    Financials,
    Report,
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateKey::Market => write!(f, "market"),
            StateKey::Competitors => write!(f, "competitors"),
            StateKey::Financials => write!(f, "financials"),
            StateKey::Report => write!(f, "report"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("state key `{0}` has already been written")]
    AlreadyWritten(StateKey),
}

/// 贯穿整条流水线的共享状态
///
/// `idea`与`mode`在创建时确定；四个输出键各自只能写入一次。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedState {
    idea: String,
    mode: Mode,
    market: String,
    competitors: String,
    financials: String,
    report: String,
}

impl SharedState {
    pub fn new(idea: impl Into<String>, mode: Mode) -> Self {
        Self {
            idea: idea.into(),
            mode,
            market: String::new(),
            competitors: String::new(),
            financials: String::new(),
            report: String::new(),
        }
    }

    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn competitors(&self) -> &str {
        &self.competitors
    }

    pub fn financials(&self) -> &str {
        &self.financials
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn get(&self, key: StateKey) -> &str {
        match key {
            StateKey::Market => &self.market,
            StateKey::Competitors => &self.competitors,
            StateKey::Financials => &self.financials,
            StateKey::Report => &self.report,
        }
    }

    /// 写入一个输出键，已写入的键拒绝覆盖
    pub fn record(&mut self, key: StateKey, text: String) -> Result<(), StateError> {
        let slot = match key {
            StateKey::Market => &mut self.market,
            StateKey::Competitors => &mut self.competitors,
            StateKey::Financials => &mut self.financials,
            StateKey::Report => &mut self.report,
        };
        if !slot.is_empty() {
            return Err(StateError::AlreadyWritten(key));
        }
        *slot = text;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        !self.idea.is_empty()
            && !self.market.is_empty()
            && !self.competitors.is_empty()
            && !self.financials.is_empty()
            && !self.report.is_empty()
    }
}
