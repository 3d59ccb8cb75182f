// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::site_status::StatusSnapshot;
use crate::utils::errors::StorageError;

/// 状态仓库特质
///
/// 定义全量状态快照的持久化契约：运行开始时读取一次，
/// 运行结束时整体替换写回一次，中途不落盘。
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// 读取上一轮持久化的状态快照，尚未存在时返回None
    async fn load(&self) -> Result<Option<StatusSnapshot>, StorageError>;

    /// 以整体替换的方式写回状态快照
    async fn save(&self, snapshot: &StatusSnapshot) -> Result<(), StorageError>;
}
