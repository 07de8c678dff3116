use crate::config::{Config, LLMProvider};
use crate::pipeline::Mode;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "validator.toml";

/// Startup Validator - 由多个AI角色协作完成的创业想法验证工具
#[derive(Parser, Debug)]
#[command(name = "startup-validator")]
#[command(
    about = "Validates a startup idea with a chain of AI analysts: market research, competitor landscape, financial model and a final validation report."
)]
#[command(version)]
pub struct Args {
    /// 待验证的创业想法
    #[arg(short, long)]
    pub idea: String,

    /// 分析模式 (fast, deep)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// LLM Provider (gemini, openai, anthropic, deepseek, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 禁用网页检索，改用占位线索
    #[arg(long)]
    pub no_web_search: bool,

    /// 禁用论坛检索，改用占位线索
    #[arg(long)]
    pub no_forum_search: bool,

    /// 同时生成路演材料
    #[arg(long)]
    pub pitch_deck: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            // 显式指定的配置文件必须可读
            Some(config_path) => Config::from_file(config_path)
                .with_context(|| format!("无法读取配置文件 {}", config_path.display()))?,
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_CONFIG_FILE);

                if default_config_path.exists() {
                    Config::from_file(&default_config_path).with_context(|| {
                        format!("无法读取默认配置文件 {}", default_config_path.display())
                    })?
                } else {
                    Config::default().with_env_overrides()
                }
            }
        };

        self.apply(&mut config)?;
        Ok(config)
    }

    /// 命令行参数覆盖配置文件中的设置
    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(mode) = self.mode {
            config.mode = Mode::normalize(&mode);
        }
        if let Some(output_path) = self.output_path {
            config.output.output_path = output_path;
        }

        if let Some(provider_str) = self.llm_provider {
            let provider = provider_str
                .parse::<LLMProvider>()
                .map_err(|e| anyhow::anyhow!(e))?;
            config.llm.switch_provider(provider);
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = Some(llm_api_base_url);
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }

        if self.no_web_search {
            config.hints.web_search_enabled = false;
        }
        if self.no_forum_search {
            config.hints.forum_search_enabled = false;
        }
        if self.pitch_deck {
            config.output.pitch_deck = true;
        }
        if self.verbose {
            config.verbose = true;
        }
        Ok(())
    }
}
