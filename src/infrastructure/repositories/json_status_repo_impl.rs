// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::site_status::StatusSnapshot;
use crate::domain::repositories::status_repository::StatusRepository;
use crate::utils::errors::StorageError;

/// 状态仓库的JSON文件实现
///
/// status.json 在加载边界完整反序列化校验，写回时整份替换。
pub struct JsonStatusRepository {
    path: PathBuf,
}

impl JsonStatusRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StatusRepository for JsonStatusRepository {
    async fn load(&self) -> Result<Option<StatusSnapshot>, StorageError> {
        match fs::read(&self.path).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn save(&self, snapshot: &StatusSnapshot) -> Result<(), StorageError> {
        // 确保目录存在
        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(snapshot)?;
        let mut file = fs::File::create(&self.path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(())
    }
}
