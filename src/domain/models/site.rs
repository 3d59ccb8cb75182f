// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 站点配置实体
///
/// 表示一个被监控的站点，由运维方在 sites.json 中维护。
/// 每次运行中配置不可变，URL 可以以加密令牌的形式存储。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Site {
    /// 站点唯一标识符，作为状态和历史记录的关联键
    #[validate(length(min = 1))]
    pub id: String,
    /// 站点显示名称
    #[validate(length(min = 1))]
    pub name: String,
    /// 目标URL，明文或加密令牌（见 encrypted 标志）
    #[validate(length(min = 1))]
    pub url: String,
    /// URL是否为加密令牌，需要在检查前解密
    #[serde(default)]
    pub encrypted: bool,
    /// 内容选择器，限定正文提取范围（CSS选择器，可选）
    #[serde(default)]
    pub selector: Option<String>,
    /// 排除选择器列表，提取前移除匹配的子结构（有序）
    #[serde(default)]
    pub exclude_selectors: Vec<String>,
    /// 站点描述信息
    #[serde(default)]
    pub description: Option<String>,
}
