use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::pipeline::state::Mode;

/// 未配置模型时使用的默认模型（对应默认的Gemini provider）
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(LLMProvider::Gemini),
            "openai" => Ok(LLMProvider::OpenAI),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl LLMProvider {
    /// 该provider是否需要API KEY才能工作
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, LLMProvider::Ollama)
    }

    /// 该provider未指定模型时使用的模型
    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => DEFAULT_MODEL,
            LLMProvider::OpenAI => "gpt-4o-mini",
            LLMProvider::Anthropic => "claude-3-5-haiku-latest",
            LLMProvider::DeepSeek => "deepseek-chat",
            LLMProvider::Ollama => "llama3.1",
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 默认分析模式
    pub mode: Mode,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 检索线索配置
    pub hints: HintConfig,

    /// 输出配置
    pub output: OutputConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY，为空时进入合成响应模式
    pub api_key: String,

    /// LLM API基地址，为空时使用provider默认值
    pub api_base_url: Option<String>,

    /// 模型名称
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 单次调用超时时间（秒）
    pub timeout_seconds: u64,
}

/// 检索线索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct HintConfig {
    /// 是否启用网页搜索
    pub web_search_enabled: bool,

    /// 是否启用论坛（Hacker News）搜索
    pub forum_search_enabled: bool,

    /// 网页搜索地址
    pub web_search_url: String,

    /// 论坛搜索地址
    pub forum_search_url: String,

    /// 请求超时时间（秒）
    pub timeout_seconds: u64,

    /// 请求使用的User-Agent
    pub user_agent: String,
}

/// 输出配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// 输出目录
    pub output_path: PathBuf,

    /// 是否在验证后生成路演材料
    pub pitch_deck: bool,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&content).context("Failed to parse config file")?;
        config.llm.align_model_with_provider();
        Ok(config.with_env_overrides())
    }

    /// 使用环境变量补齐未配置的凭据与模型
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(env_value)
    }

    /// `GOOGLE_API_KEY`与`GEMINI_MODEL`只作用于Gemini provider，且不覆盖显式配置的值
    pub(crate) fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.llm.provider != LLMProvider::Gemini {
            return self;
        }
        if self.llm.api_key.trim().is_empty() {
            self.llm.api_key = lookup("GOOGLE_API_KEY").unwrap_or_default();
        }
        if self.llm.model == DEFAULT_MODEL {
            if let Some(model) = lookup("GEMINI_MODEL") {
                self.llm.model = model;
            }
        }
        self
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl LLMConfig {
    /// 切换provider；模型仍是原provider的默认模型时随之切换
    pub fn switch_provider(&mut self, provider: LLMProvider) {
        if self.model == self.provider.default_model() {
            self.model = provider.default_model().to_string();
        }
        self.provider = provider;
    }

    /// 配置文件只指定了provider时，把Gemini默认模型替换为该provider的默认模型
    fn align_model_with_provider(&mut self) {
        if self.model == DEFAULT_MODEL {
            self.model = self.provider.default_model().to_string();
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Fast,
            llm: LLMConfig::default(),
            hints: HintConfig::default(),
            output: OutputConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: String::new(),
            api_base_url: None,
            model: String::from(DEFAULT_MODEL),
            max_tokens: 8192,
            temperature: 0.2,
            timeout_seconds: 120,
        }
    }
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            web_search_enabled: true,
            forum_search_enabled: true,
            web_search_url: String::from("https://html.duckduckgo.com/html/"),
            forum_search_url: String::from("https://hn.algolia.com/api/v1/search"),
            timeout_seconds: 10,
            user_agent: String::from("Mozilla/5.0"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./validation.out"),
            pitch_deck: false,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
