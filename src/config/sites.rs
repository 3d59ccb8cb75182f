// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;
use tokio::fs;
use validator::Validate;

use crate::domain::models::site::Site;

/// 站点配置错误类型
///
/// 站点配置的任何问题都是致命的：没有部分配置恢复，
/// 整次运行直接终止。
#[derive(Error, Debug)]
pub enum SiteConfigError {
    #[error("读取站点配置失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("解析站点配置失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("站点配置校验失败 [{id}]: {source}")]
    Validation {
        id: String,
        source: validator::ValidationErrors,
    },

    #[error("站点ID重复: {0}")]
    DuplicateId(String),
}

/// sites.json 的顶层结构
#[derive(Debug, Deserialize)]
struct SitesFile {
    sites: Vec<Site>,
}

/// 加载并校验站点列表
///
/// 在加载边界完成全部校验：缺失字段在反序列化时拒绝，
/// 空字段由validator拒绝，重复ID显式报错。返回的列表
/// 保持文件中的顺序。
pub async fn load_sites(path: &str) -> Result<Vec<Site>, SiteConfigError> {
    let data = fs::read(path).await?;
    let file: SitesFile = serde_json::from_slice(&data)?;

    let mut seen = HashSet::new();
    for site in &file.sites {
        site.validate().map_err(|e| SiteConfigError::Validation {
            id: site.id.clone(),
            source: e,
        })?;
        if !seen.insert(site.id.clone()) {
            return Err(SiteConfigError::DuplicateId(site.id.clone()));
        }
    }

    Ok(file.sites)
}
