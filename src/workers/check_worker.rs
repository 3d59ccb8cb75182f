// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::models::history::{HistoryEntry, HistoryLog};
use crate::domain::models::site::Site;
use crate::domain::models::site_status::{CheckStatus, SiteStatus, StatusSnapshot};
use crate::domain::services::change_detector::ChangeDetector;
use crate::domain::services::content_normalizer::ContentNormalizer;
use crate::domain::services::url_cipher::UrlCipher;
use crate::engines::traits::FetchEngine;

/// 检查工作者
///
/// 驱动单次运行：按配置顺序依次检查每个站点，把结果累积成
/// 新的状态快照和历史日志。站点级失败被就地隔离为 error 状态，
/// 不会中断整次运行；持久化由调用方在运行结束后统一完成。
pub struct CheckWorker<E> {
    engine: E,
    cipher: UrlCipher,
}

impl<E> CheckWorker<E>
where
    E: FetchEngine,
{
    /// 创建新的检查工作者实例
    pub fn new(engine: E, cipher: UrlCipher) -> Self {
        Self { engine, cipher }
    }

    /// 执行一轮完整检查
    ///
    /// # 参数
    ///
    /// * `sites` - 有序站点列表
    /// * `prior` - 上一轮持久化的状态快照
    /// * `history` - 历史日志（就地追加，成功的检查每站点一条）
    ///
    /// # 返回值
    ///
    /// 新的状态快照，整体替换上一轮
    pub async fn run(
        &self,
        sites: &[Site],
        prior: &StatusSnapshot,
        history: &mut HistoryLog,
    ) -> StatusSnapshot {
        info!("开始检查 {} 个站点", sites.len());

        let mut statuses = Vec::with_capacity(sites.len());
        for site in sites {
            let status = self.check_site(site, prior, history).await;
            match status.status {
                CheckStatus::Updated => info!(site = %site.id, "检测到内容变化"),
                CheckStatus::Unchanged => debug!(site = %site.id, "内容未变化"),
                CheckStatus::Error => {
                    warn!(site = %site.id, error = ?status.error, "检查失败")
                }
            }
            statuses.push(status);
        }

        let snapshot = StatusSnapshot::new(statuses);
        info!("本轮检查完成");
        snapshot
    }

    /// 检查单个站点
    ///
    /// 解密（如需要）→ 抓取 → 规范化 → 分类 → 记历史。
    /// 任何一步失败都转换为 error 状态返回；失败的检查不产生
    /// 历史条目。
    async fn check_site(
        &self,
        site: &Site,
        prior: &StatusSnapshot,
        history: &mut HistoryLog,
    ) -> SiteStatus {
        let now = Utc::now();

        // 解密失败与抓取失败同等对待：按站点隔离
        let target_url = if site.encrypted {
            match self.cipher.decrypt(&site.url) {
                Ok(url) => url,
                Err(e) => return Self::error_status(site, now, format!("URL解密失败: {}", e)),
            }
        } else {
            site.url.clone()
        };

        let response = match self.engine.fetch(&target_url).await {
            Ok(response) => response,
            Err(e) => return Self::error_status(site, now, e.to_string()),
        };
        debug!(
            site = %site.id,
            status_code = response.status_code,
            response_time_ms = response.response_time_ms,
            "抓取完成"
        );

        let normalized = match ContentNormalizer::normalize(
            &response.content,
            site.selector.as_deref(),
            &site.exclude_selectors,
        ) {
            Ok(text) => text,
            Err(e) => return Self::error_status(site, now, e.to_string()),
        };

        let prior_status = prior.find(&site.id);
        let prior_hash = prior_status.and_then(|s| s.hash.as_deref());
        let prior_last_change = prior_status.and_then(|s| s.last_change);
        let classification = ChangeDetector::classify(&normalized, prior_hash, prior_last_change, now);

        history.append(
            &site.id,
            HistoryEntry {
                timestamp: now,
                status: classification.status,
                hash: classification.hash.clone(),
                change_detected: classification.change_detected,
            },
        );

        SiteStatus {
            id: site.id.clone(),
            name: site.name.clone(),
            // 展示用URL保持配置中的原样，加密站点不落明文
            url: site.url.clone(),
            status: classification.status,
            last_check: now,
            last_change: classification.last_change,
            hash: Some(classification.hash),
            error: None,
            encrypted: site.encrypted,
        }
    }

    /// 构造站点级失败的状态记录
    fn error_status(site: &Site, now: chrono::DateTime<Utc>, message: String) -> SiteStatus {
        SiteStatus {
            id: site.id.clone(),
            name: site.name.clone(),
            url: site.url.clone(),
            status: CheckStatus::Error,
            last_check: now,
            last_change: None,
            hash: None,
            error: Some(message),
            encrypted: site.encrypted,
        }
    }
}
