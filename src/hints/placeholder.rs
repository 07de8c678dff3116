use anyhow::Result;
use async_trait::async_trait;

use crate::hints::HintProvider;

/// 确定性的占位线索，每条都引用查询词与序号
#[derive(Debug, Clone)]
pub struct PlaceholderHints {
    name: &'static str,
    render: fn(&str, usize) -> String,
}

impl PlaceholderHints {
    pub fn web() -> Self {
        Self {
            name: "web-placeholder",
            render: |query, position| format!("(hint) Search result for: {} [{}]", query, position),
        }
    }

    pub fn forum() -> Self {
        Self {
            name: "forum-placeholder",
            render: |query, position| {
                format!("(HN) Possibly related thread: {} #{}", query, position)
            },
        }
    }

    pub fn generate(&self, query: &str, limit: usize) -> Vec<String> {
        (1..=limit).map(|i| (self.render)(query, i)).collect()
    }
}

#[async_trait]
impl HintProvider for PlaceholderHints {
    fn name(&self) -> &str {
        self.name
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        Ok(self.generate(query, limit))
    }
}

/// 包装真实提供者，网络失败时返回占位线索
pub struct WithPlaceholder<P> {
    inner: P,
    fallback: PlaceholderHints,
}

impl<P: HintProvider> WithPlaceholder<P> {
    pub fn new(inner: P, fallback: PlaceholderHints) -> Self {
        Self { inner, fallback }
    }
}

#[async_trait]
impl<P: HintProvider> HintProvider for WithPlaceholder<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        match self.inner.search(query, limit).await {
            Ok(hints) => Ok(hints),
            Err(e) => {
                tracing::warn!(provider = self.inner.name(), "检索失败，改用占位线索: {}", e);
                Ok(self.fallback.generate(query, limit))
            }
        }
    }
}
