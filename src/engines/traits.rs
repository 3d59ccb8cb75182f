// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP状态码不在成功区间
    #[error("HTTP {status} {reason}")]
    HttpStatus { status: u16, reason: String },
    /// 请求失败（连接失败、超时等）
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// URL不合法
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// 抓取响应
#[derive(Debug)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容（原始响应体）
    pub content: String,
    /// 内容类型
    pub content_type: String,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 抓取引擎特质
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 对目标URL执行一次抓取，不做重试
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
