// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含存储路径和加密密钥等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 存储配置
    pub storage: StorageSettings,
    /// 加密配置
    pub crypto: CryptoSettings,
}

/// 存储配置设置
#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    /// 站点配置文件路径（输入，运维方维护）
    pub sites_path: String,
    /// 状态快照文件路径（输出，看板只读消费）
    pub status_path: String,
    /// 历史日志文件路径（输出，看板只读消费）
    pub history_path: String,
}

/// 加密配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CryptoSettings {
    /// 运维方口令，用于派生URL加密密钥
    pub secret: Option<String>,
    /// 未配置口令时是否允许退回内置默认密钥（低安全模式，需显式开启）
    pub allow_default_key: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default storage settings
            .set_default("storage.sites_path", "config/sites.json")?
            .set_default("storage.status_path", "data/status.json")?
            .set_default("storage.history_path", "data/history.json")?
            // Default crypto settings: no secret, no silent fallback
            .set_default("crypto.allow_default_key", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("WATCHRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
