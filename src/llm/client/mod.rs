//! LLM客户端 - 流水线调用外部文本生成服务的唯一出口

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::LLMConfig;

mod providers;
pub mod utils;

pub use providers::ProviderClient;
use utils::truncate_chars;

/// 合成响应的标记前缀
pub const SYNTHETIC_TAG: &str = "[SYNTHETIC RESPONSE]";
/// 调用出错时的标记前缀
pub const ERROR_TAG: &str = "[LLM error:";
/// 模型返回空内容时的占位文本
pub const EMPTY_PLACEHOLDER: &str = "(empty response)";
/// 合成响应中保留的prompt前缀长度（字符）
const SYNTHETIC_PREFIX_CHARS: usize = 120;

/// 文本生成后端
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// 后端描述，仅用于日志
    fn describe(&self) -> String;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// 单次生成的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// 模型正常返回的文本
    Generated(String),
    /// 后端不可用时的合成文本
    Synthetic(String),
    /// 调用失败，携带错误描述
    Failed(String),
    /// 模型返回了空内容
    Empty,
}

impl Completion {
    /// 转换为下游使用的纯文本，合成与失败结果以标记前缀区分
    pub fn into_text(self) -> String {
        match self {
            Completion::Generated(text) => text,
            Completion::Synthetic(text) => text,
            Completion::Failed(description) => format!("{} {}]", ERROR_TAG, description),
            Completion::Empty => EMPTY_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, Completion::Generated(_))
    }
}

/// LLM客户端
///
/// 后端在构造时确定，之后只读，可在多个流水线之间共享。
#[derive(Clone)]
pub struct LLMClient {
    backend: Option<Arc<dyn CompletionBackend>>,
    timeout: Option<Duration>,
}

impl LLMClient {
    /// 根据配置创建客户端，缺少凭据或provider构建失败时进入合成响应模式
    pub fn new(config: &LLMConfig) -> Self {
        if config.provider.requires_api_key() && config.api_key.trim().is_empty() {
            tracing::warn!("未配置LLM API KEY，使用合成响应模式");
            return Self::offline();
        }

        match ProviderClient::new(config) {
            Ok(client) => {
                tracing::info!(provider = %config.provider, model = %config.model, "LLM后端已就绪");
                Self {
                    backend: Some(Arc::new(client)),
                    timeout: Some(Duration::from_secs(config.timeout_seconds)),
                }
            }
            Err(e) => {
                tracing::warn!("LLM后端初始化失败，使用合成响应模式: {}", e);
                Self::offline()
            }
        }
    }

    /// 不绑定任何后端的客户端
    pub fn offline() -> Self {
        Self {
            backend: None,
            timeout: None,
        }
    }

    /// 使用自定义后端创建客户端
    pub fn with_backend(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend: Some(backend),
            timeout: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// 生成文本，永不返回错误
    pub async fn complete(&self, prompt: &str) -> String {
        self.complete_detailed(prompt).await.into_text()
    }

    /// 生成文本并保留结果类型
    pub async fn complete_detailed(&self, prompt: &str) -> Completion {
        let Some(backend) = &self.backend else {
            return Completion::Synthetic(Self::synthetic_response(prompt));
        };

        tracing::debug!(backend = %backend.describe(), prompt_chars = prompt.chars().count(), "调用模型服务");

        let outcome = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, backend.generate(prompt)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(anyhow::anyhow!(
                    "request timed out after {}s",
                    timeout.as_secs()
                )),
            },
            None => backend.generate(prompt).await,
        };

        match outcome {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!("模型返回空内容");
                Completion::Empty
            }
            Ok(text) => Completion::Generated(text),
            Err(e) => {
                tracing::warn!("❌ 调用模型服务出错: {}", e);
                Completion::Failed(e.to_string())
            }
        }
    }

    /// 后端不可用时的确定性合成文本
    pub fn synthetic_response(prompt: &str) -> String {
        format!(
            "{} {}...",
            SYNTHETIC_TAG,
            truncate_chars(prompt, SYNTHETIC_PREFIX_CHARS)
        )
    }
}
