//! 网页搜索（DuckDuckGo HTML端点）

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use crate::config::HintConfig;
use crate::hints::HintProvider;

static RESULT_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a[^>]*class="[^"]*result__a[^"]*"[^>]*>(.*?)</a>"#)
        .expect("result anchor pattern is valid")
});
static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

pub struct WebSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl WebSearch {
    pub fn new(config: &HintConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build web search client")?;
        Ok(Self {
            client,
            endpoint: config.web_search_url.clone(),
        })
    }

    /// 从结果页中提取标题文本
    pub fn parse_titles(html: &str, limit: usize) -> Vec<String> {
        RESULT_ANCHOR
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| decode_entities(INNER_TAG.replace_all(m.as_str(), "").trim()))
            .filter(|title| !title.is_empty())
            .take(limit)
            .collect()
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[async_trait]
impl HintProvider for WebSearch {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let html = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(Self::parse_titles(&html, limit))
    }
}
