// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 检查状态枚举
///
/// 一次检查的分类结果。序列化值（unchanged/updated/error）是
/// 对外看板的稳定契约，不得改名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// 内容未发生变化（含首次观察的冷启动基线）
    Unchanged,
    /// 内容相对上次记录的指纹发生了变化
    Updated,
    /// 本次检查失败（抓取、解密或解析错误）
    Error,
}

/// 站点状态实体
///
/// 记录单个站点最近一次检查的完整结果。url 字段按展示形式
/// 保存：加密站点保留原始加密令牌，不落明文。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteStatus {
    /// 站点唯一标识符
    pub id: String,
    /// 站点显示名称
    pub name: String,
    /// 展示用URL（加密站点为原始加密令牌）
    pub url: String,
    /// 本次检查的分类结果
    pub status: CheckStatus,
    /// 本次检查时间
    pub last_check: DateTime<Utc>,
    /// 最近一次检测到变化的时间（从未变化时缺省）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_change: Option<DateTime<Utc>>,
    /// 规范化内容的十六进制指纹（检查失败时缺省）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// 错误信息（检查成功时缺省）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// URL是否以加密形式存储
    pub encrypted: bool,
}

/// 状态快照聚合
///
/// 一次完整运行产出的全量站点状态列表。每次运行整体替换，
/// 不做合并。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// 全局最近变化时间 = 所有站点 last_change 的最大值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// 按配置顺序排列的站点状态列表
    #[serde(default)]
    pub sites: Vec<SiteStatus>,
}

impl StatusSnapshot {
    /// 从站点状态列表构建快照，重新计算 last_updated
    pub fn new(sites: Vec<SiteStatus>) -> Self {
        let last_updated = sites.iter().filter_map(|s| s.last_change).max();
        Self {
            last_updated,
            sites,
        }
    }

    /// 按站点ID查找上一轮的状态记录
    pub fn find(&self, site_id: &str) -> Option<&SiteStatus> {
        self.sites.iter().find(|s| s.id == site_id)
    }
}
