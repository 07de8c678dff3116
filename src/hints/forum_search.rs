//! 论坛搜索（Hacker News Algolia API）

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::HintConfig;
use crate::hints::HintProvider;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: Option<String>,
}

pub struct ForumSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl ForumSearch {
    pub fn new(config: &HintConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build forum search client")?;
        Ok(Self {
            client,
            endpoint: config.forum_search_url.clone(),
        })
    }

    /// 解析搜索结果，跳过没有标题的条目
    pub fn parse_titles(body: &str, limit: usize) -> Result<Vec<String>> {
        let response: SearchResponse =
            serde_json::from_str(body).context("Malformed forum search response")?;
        Ok(response
            .hits
            .into_iter()
            .filter_map(|hit| hit.title)
            .filter(|title| !title.trim().is_empty())
            .take(limit)
            .collect())
    }
}

#[async_trait]
impl HintProvider for ForumSearch {
    fn name(&self) -> &str {
        "hackernews"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let hits_per_page = limit.to_string();
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("hitsPerPage", hits_per_page.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Self::parse_titles(&body, limit)
    }
}
