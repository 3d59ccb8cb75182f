// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use url::Url;

use crate::engines::traits::{FetchEngine, FetchError, FetchResponse};

/// 连接超时，单次检查的连接建立预算
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// 读取超时，整个请求的总预算
const READ_TIMEOUT: Duration = Duration::from_secs(30);
/// 固定的客户端标识
const USER_AGENT: &str = "Mozilla/5.0 (compatible; watchrs/1.0; +https://github.com/Kirky-X/watchrs)";

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎。每个站点一次阻塞式
/// GET，带固定超时预算，不做重试；失败由调用方按站点隔离。
pub struct ReqwestEngine;

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 抓取响应（仅2xx）
    /// * `Err(FetchError)` - 非2xx状态、连接失败或超时
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let parsed = Url::parse(url)?;

        // Each request gets a fresh client for cookie isolation
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()?;

        let start = Instant::now();
        let response = client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        let content = response.text().await?;

        Ok(FetchResponse {
            status_code: status.as_u16(),
            content,
            content_type,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
