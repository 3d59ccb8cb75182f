// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::info;

use watchrs::config::settings::Settings;
use watchrs::config::sites;
use watchrs::domain::repositories::history_repository::HistoryRepository;
use watchrs::domain::repositories::status_repository::StatusRepository;
use watchrs::domain::services::url_cipher::UrlCipher;
use watchrs::engines::reqwest_engine::ReqwestEngine;
use watchrs::infrastructure::repositories::json_history_repo_impl::JsonHistoryRepository;
use watchrs::infrastructure::repositories::json_status_repo_impl::JsonStatusRepository;
use watchrs::utils::telemetry;
use watchrs::workers::check_worker::CheckWorker;

/// 主函数
///
/// 应用程序入口点，驱动一轮完整的站点检查。调度由外部
/// （cron、CI等）负责，进程内不做循环。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting watchrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Load the site list (missing or unparsable configuration is fatal)
    let site_list = sites::load_sites(&settings.storage.sites_path).await?;
    info!("Loaded {} sites", site_list.len());

    // 4. Initialize the URL cipher
    let cipher = UrlCipher::from_settings(&settings.crypto)?;

    // 5. Load prior state once, at the start of the run
    let status_repo = JsonStatusRepository::new(&settings.storage.status_path);
    let history_repo = JsonHistoryRepository::new(&settings.storage.history_path);
    let prior = status_repo.load().await?.unwrap_or_default();
    let mut history = history_repo.load().await?.unwrap_or_default();

    // 6. Run the sequential check pass
    let worker = CheckWorker::new(ReqwestEngine, cipher);
    let snapshot = worker.run(&site_list, &prior, &mut history).await;

    // 7. Persist exactly once, at the end of the run
    status_repo.save(&snapshot).await?;
    history_repo.save(&history).await?;
    info!(
        "Run complete: {} sites checked, last_updated = {:?}",
        snapshot.sites.len(),
        snapshot.last_updated
    );

    Ok(())
}
