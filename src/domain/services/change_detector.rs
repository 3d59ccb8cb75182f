// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};

use crate::domain::models::site_status::CheckStatus;

/// 分类结果
///
/// 一次成功检查在与上一轮状态比对后得到的完整判定。
#[derive(Debug, Clone)]
pub struct Classification {
    /// 检查状态（unchanged 或 updated）
    pub status: CheckStatus,
    /// 本次内容的十六进制指纹
    pub hash: String,
    /// 是否检测到变化
    pub change_detected: bool,
    /// 最近变化时间：变化时为本次检查时间，否则沿用上一轮的值
    pub last_change: Option<DateTime<Utc>>,
}

/// 变化检测器
///
/// 对规范化文本计算128位内容指纹，并与上一轮记录的指纹比对
/// 得出分类。指纹使用快速的非对抗性摘要，哈希碰撞是已接受
/// 的风险，这里不是安全边界。
pub struct ChangeDetector;

impl ChangeDetector {
    /// 计算规范化文本的内容指纹（32个十六进制字符）
    ///
    /// 指纹是规范化文本的纯函数：相同输入跨运行恒定。
    pub fn fingerprint(normalized: &str) -> String {
        hex::encode(md5::compute(normalized.as_bytes()).0)
    }

    /// 与上一轮状态比对并分类
    ///
    /// 规则：
    /// - 无历史指纹 → unchanged（冷启动基线，不算"已更新"），last_change 缺省；
    /// - 有历史指纹且不同 → updated，last_change 取本次时间；
    /// - 有历史指纹且相同 → unchanged，last_change 沿用上一轮。
    pub fn classify(
        normalized: &str,
        prior_hash: Option<&str>,
        prior_last_change: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Classification {
        let hash = Self::fingerprint(normalized);
        match prior_hash {
            None => Classification {
                status: CheckStatus::Unchanged,
                hash,
                change_detected: false,
                last_change: None,
            },
            Some(prior) if prior != hash => Classification {
                status: CheckStatus::Updated,
                hash,
                change_detected: true,
                last_change: Some(now),
            },
            Some(_) => Classification {
                status: CheckStatus::Unchanged,
                hash,
                change_detected: false,
                last_change: prior_last_change,
            },
        }
    }
}
