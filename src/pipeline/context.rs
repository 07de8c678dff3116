use crate::config::Config;
use crate::hints::HintSources;
use crate::llm::client::LLMClient;

/// 流水线上下文，持有各阶段共享的只读协作者
#[derive(Clone)]
pub struct PipelineContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 检索线索来源
    pub hints: HintSources,
}

impl PipelineContext {
    /// 根据配置创建上下文
    pub fn new(config: &Config) -> Self {
        Self {
            llm_client: LLMClient::new(&config.llm),
            hints: HintSources::from_config(&config.hints),
        }
    }

    /// 使用指定协作者创建上下文
    pub fn with_parts(llm_client: LLMClient, hints: HintSources) -> Self {
        Self { llm_client, hints }
    }

    /// 完全离线的上下文：合成响应 + 占位线索
    pub fn offline() -> Self {
        Self::with_parts(LLMClient::offline(), HintSources::offline())
    }
}
