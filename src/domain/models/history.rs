// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::models::site_status::CheckStatus;

/// 每个站点保留的最大历史条数，超出后先进先出淘汰
pub const MAX_HISTORY_PER_SITE: usize = 100;

/// 历史记录条目
///
/// 一次成功检查的留痕。失败的检查不产生历史条目，只记录在
/// 当前状态里，历史仅对完成的检查有意义。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 检查时间
    pub timestamp: DateTime<Utc>,
    /// 检查的分类结果
    pub status: CheckStatus,
    /// 规范化内容的十六进制指纹
    pub hash: String,
    /// 本次是否检测到变化
    pub change_detected: bool,
}

/// 按站点组织的历史日志
///
/// 站点ID到有序条目列表的映射，最新条目在尾部。每个站点
/// 的长度上限为 [`MAX_HISTORY_PER_SITE`]。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: BTreeMap<String, Vec<HistoryEntry>>,
}

impl HistoryLog {
    /// 追加一条历史记录并截断到容量上限（淘汰最旧条目）
    pub fn append(&mut self, site_id: &str, entry: HistoryEntry) {
        let list = self.entries.entry(site_id.to_string()).or_default();
        list.push(entry);
        if list.len() > MAX_HISTORY_PER_SITE {
            let overflow = list.len() - MAX_HISTORY_PER_SITE;
            list.drain(..overflow);
        }
    }

    /// 读取某站点的历史条目（按时间顺序，最新在尾部）
    pub fn entries(&self, site_id: &str) -> &[HistoryEntry] {
        self.entries.get(site_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 历史中是否没有任何站点的记录
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
