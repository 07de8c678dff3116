//! 检索函数适配层
//!
//! 具体的检索实现参数约定各不相同，在这里统一收敛到`HintProvider`接口，
//! 流水线只依赖该接口本身。

use anyhow::Result;
use async_trait::async_trait;

use crate::hints::HintProvider;

/// 以具名字段传递条数上限的检索请求
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub n: usize,
}

type PositionalFn = dyn Fn(&str, usize) -> Result<Vec<String>> + Send + Sync;
type NamedFn = dyn Fn(SearchRequest) -> Result<Vec<String>> + Send + Sync;
type UnboundedFn = dyn Fn(&str) -> Result<Vec<String>> + Send + Sync;

/// 三种已知的检索函数签名
pub enum SearchSignature {
    /// `search(query, limit)`
    Positional(Box<PositionalFn>),
    /// `search(SearchRequest { query, n })`
    Named(Box<NamedFn>),
    /// `search(query)`，由适配层在本地截断
    Unbounded(Box<UnboundedFn>),
}

/// 把任意签名的检索函数适配为`HintProvider`
pub struct SearchFn {
    name: String,
    signature: SearchSignature,
}

impl SearchFn {
    pub fn positional<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, usize) -> Result<Vec<String>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature: SearchSignature::Positional(Box::new(f)),
        }
    }

    pub fn named<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(SearchRequest) -> Result<Vec<String>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature: SearchSignature::Named(Box::new(f)),
        }
    }

    pub fn unbounded<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<String>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature: SearchSignature::Unbounded(Box::new(f)),
        }
    }
}

#[async_trait]
impl HintProvider for SearchFn {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let mut hints = match &self.signature {
            SearchSignature::Positional(f) => f(query, limit)?,
            SearchSignature::Named(f) => f(SearchRequest {
                query: query.to_string(),
                n: limit,
            })?,
            SearchSignature::Unbounded(f) => f(query)?,
        };
        hints.truncate(limit);
        Ok(hints)
    }
}
