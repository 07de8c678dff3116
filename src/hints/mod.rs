//! 检索线索 - 为各阶段补充简短的外部文本片段

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::HintConfig;

pub mod adapter;
pub mod forum_search;
pub mod placeholder;
pub mod web_search;

pub use adapter::{SearchFn, SearchRequest};
pub use forum_search::ForumSearch;
pub use placeholder::{PlaceholderHints, WithPlaceholder};
pub use web_search::WebSearch;

/// 检索线索提供者
#[async_trait]
pub trait HintProvider: Send + Sync {
    fn name(&self) -> &str;

    /// 返回最多`limit`条线索，顺序由提供者决定
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>>;
}

/// 阶段侧的检索入口：截断到`limit`，任何错误都降级为空列表
pub async fn gather_hints(provider: &dyn HintProvider, query: &str, limit: usize) -> Vec<String> {
    match provider.search(query, limit).await {
        Ok(mut hints) => {
            hints.truncate(limit);
            tracing::debug!(provider = provider.name(), count = hints.len(), "获取检索线索");
            hints
        }
        Err(e) => {
            tracing::warn!(provider = provider.name(), "⚠️ 检索线索获取失败，使用空列表: {}", e);
            Vec::new()
        }
    }
}

/// 流水线使用的两类线索来源
#[derive(Clone)]
pub struct HintSources {
    pub web: Arc<dyn HintProvider>,
    pub forum: Arc<dyn HintProvider>,
}

impl HintSources {
    /// 根据配置绑定线索来源，禁用或构建失败的来源退化为占位线索
    pub fn from_config(config: &HintConfig) -> Self {
        let web: Arc<dyn HintProvider> = if config.web_search_enabled {
            match WebSearch::new(config) {
                Ok(search) => Arc::new(WithPlaceholder::new(search, PlaceholderHints::web())),
                Err(e) => {
                    tracing::warn!("网页搜索初始化失败，使用占位线索: {}", e);
                    Arc::new(PlaceholderHints::web())
                }
            }
        } else {
            Arc::new(PlaceholderHints::web())
        };

        let forum: Arc<dyn HintProvider> = if config.forum_search_enabled {
            match ForumSearch::new(config) {
                Ok(search) => Arc::new(WithPlaceholder::new(search, PlaceholderHints::forum())),
                Err(e) => {
                    tracing::warn!("论坛搜索初始化失败，使用占位线索: {}", e);
                    Arc::new(PlaceholderHints::forum())
                }
            }
        } else {
            Arc::new(PlaceholderHints::forum())
        };

        Self { web, forum }
    }

    /// 完全离线的占位线索
    pub fn offline() -> Self {
        Self {
            web: Arc::new(PlaceholderHints::web()),
            forum: Arc::new(PlaceholderHints::forum()),
        }
    }
}
