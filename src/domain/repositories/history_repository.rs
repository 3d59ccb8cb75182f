// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::history::HistoryLog;
use crate::utils::errors::StorageError;

/// 历史仓库特质
///
/// 定义按站点组织的历史日志的持久化契约，读写时机与
/// 状态仓库一致：开始读一次，结束写一次。
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// 读取历史日志，尚未存在时返回None
    async fn load(&self) -> Result<Option<HistoryLog>, StorageError>;

    /// 以整体替换的方式写回历史日志
    async fn save(&self, history: &HistoryLog) -> Result<(), StorageError>;
}
