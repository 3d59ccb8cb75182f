// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::history::HistoryLog;
use crate::domain::repositories::history_repository::HistoryRepository;
use crate::utils::errors::StorageError;

/// 历史仓库的JSON文件实现
pub struct JsonHistoryRepository {
    path: PathBuf,
}

impl JsonHistoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn load(&self) -> Result<Option<HistoryLog>, StorageError> {
        match fs::read(&self.path).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn save(&self, history: &HistoryLog) -> Result<(), StorageError> {
        // 确保目录存在
        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(history)?;
        let mut file = fs::File::create(&self.path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(())
    }
}
