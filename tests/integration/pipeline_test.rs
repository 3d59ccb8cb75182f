// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use watchrs::domain::models::history::HistoryLog;
use watchrs::domain::models::site::Site;
use watchrs::domain::models::site_status::{CheckStatus, StatusSnapshot};
use watchrs::domain::services::url_cipher::UrlCipher;
use watchrs::engines::reqwest_engine::ReqwestEngine;
use watchrs::workers::check_worker::CheckWorker;

const SECRET: &str = "integration-test-secret";

fn site(id: &str, url: &str) -> Site {
    Site {
        id: id.to_string(),
        name: id.to_string(),
        url: url.to_string(),
        encrypted: false,
        selector: None,
        exclude_selectors: Vec::new(),
        description: None,
    }
}

fn worker() -> CheckWorker<ReqwestEngine> {
    CheckWorker::new(ReqwestEngine, UrlCipher::new(SECRET))
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body.to_string()),
        )
        .mount(server)
        .await;
}

/// 场景A：抓取返回404 → 状态为error、无hash、错误信息含404，
/// 且该站点的历史保持运行前的样子
#[tokio::test]
async fn test_scenario_a_http_error_is_isolated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let sites = vec![site("blog", &format!("{}/blog", server.uri()))];
    let mut history = HistoryLog::default();
    let prior = StatusSnapshot::default();

    let snapshot = worker().run(&sites, &prior, &mut history).await;

    let status = &snapshot.sites[0];
    assert_eq!(status.status, CheckStatus::Error);
    assert!(status.hash.is_none());
    assert!(status.last_change.is_none());
    assert!(status.error.as_ref().unwrap().contains("404"));
    // 失败的检查不产生历史条目
    assert!(history.entries("blog").is_empty());
}

/// 场景B：两次抓取之间只有内嵌时间戳变化 → 两次都是unchanged
#[tokio::test]
async fn test_scenario_b_timestamp_noise_is_suppressed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/news",
        "<html><body><p>Weather stays fine. Generated 2024-01-01 10:30:00</p></body></html>",
    )
    .await;

    let sites = vec![site("news", &format!("{}/news", server.uri()))];
    let worker = worker();
    let mut history = HistoryLog::default();

    let first = worker
        .run(&sites, &StatusSnapshot::default(), &mut history)
        .await;
    assert_eq!(first.sites[0].status, CheckStatus::Unchanged);

    // 同一页面，只有时间戳不同
    server.reset().await;
    mount_page(
        &server,
        "/news",
        "<html><body><p>Weather stays fine. Generated 2024-03-15 23:59:59</p></body></html>",
    )
    .await;

    let second = worker.run(&sites, &first, &mut history).await;
    let status = &second.sites[0];
    assert_eq!(status.status, CheckStatus::Unchanged);
    assert_eq!(status.hash, first.sites[0].hash);
    assert!(status.last_change.is_none());
    assert!(second.last_updated.is_none());
    assert_eq!(history.entries("news").len(), 2);
    assert!(!history.entries("news")[1].change_detected);
}

/// 场景C：内容真实变化 → 第二次为updated，last_change取第二次
/// 检查时间，历史恰好多一条
#[tokio::test]
async fn test_scenario_c_real_change_is_detected() {
    let server = MockServer::start().await;
    mount_page(&server, "/shop", "<html><body>Old price: 10</body></html>").await;

    let sites = vec![site("shop", &format!("{}/shop", server.uri()))];
    let worker = worker();
    let mut history = HistoryLog::default();

    let first = worker
        .run(&sites, &StatusSnapshot::default(), &mut history)
        .await;
    assert_eq!(first.sites[0].status, CheckStatus::Unchanged);
    let entries_before = history.entries("shop").len();

    server.reset().await;
    mount_page(&server, "/shop", "<html><body>New price: 20</body></html>").await;

    let before_second_run = Utc::now();
    let second = worker.run(&sites, &first, &mut history).await;

    let status = &second.sites[0];
    assert_eq!(status.status, CheckStatus::Updated);
    assert_ne!(status.hash, first.sites[0].hash);
    let change_time = status.last_change.unwrap();
    assert!(change_time >= before_second_run);
    assert_eq!(status.last_change, Some(status.last_check));
    assert_eq!(second.last_updated, status.last_change);

    assert_eq!(history.entries("shop").len(), entries_before + 1);
    let last_entry = history.entries("shop").last().unwrap();
    assert!(last_entry.change_detected);
    assert_eq!(last_entry.status, CheckStatus::Updated);
}

/// 冷启动：没有历史指纹的站点首次观察一律unchanged
#[tokio::test]
async fn test_cold_start_baseline() {
    let server = MockServer::start().await;
    mount_page(&server, "/fresh", "<html><body>Anything</body></html>").await;

    let sites = vec![site("fresh", &format!("{}/fresh", server.uri()))];
    let mut history = HistoryLog::default();

    let snapshot = worker()
        .run(&sites, &StatusSnapshot::default(), &mut history)
        .await;

    let status = &snapshot.sites[0];
    assert_eq!(status.status, CheckStatus::Unchanged);
    assert!(status.last_change.is_none());
    assert!(status.hash.is_some());
    assert!(snapshot.last_updated.is_none());
    assert_eq!(history.entries("fresh").len(), 1);
}

/// 一个站点失败不影响后续站点：失败隔离按配置顺序逐站生效
#[tokio::test]
async fn test_per_site_failure_isolation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/up", "<html><body>Still here</body></html>").await;

    let sites = vec![
        site("down", &format!("{}/down", server.uri())),
        site("up", &format!("{}/up", server.uri())),
    ];
    let mut history = HistoryLog::default();

    let snapshot = worker()
        .run(&sites, &StatusSnapshot::default(), &mut history)
        .await;

    assert_eq!(snapshot.sites.len(), 2);
    assert_eq!(snapshot.sites[0].status, CheckStatus::Error);
    assert_eq!(snapshot.sites[1].status, CheckStatus::Unchanged);
    assert!(history.entries("down").is_empty());
    assert_eq!(history.entries("up").len(), 1);
}

/// 加密站点：运行时解密出真实URL抓取，但状态里仍保留原始令牌
#[tokio::test]
async fn test_encrypted_site_round_trip() {
    let server = MockServer::start().await;
    mount_page(&server, "/private", "<html><body>Private page</body></html>").await;

    let cipher = UrlCipher::new(SECRET);
    let token = cipher.encrypt(&format!("{}/private", server.uri()));

    let mut encrypted_site = site("private", &token);
    encrypted_site.encrypted = true;

    let mut history = HistoryLog::default();
    let snapshot = worker()
        .run(
            &[encrypted_site],
            &StatusSnapshot::default(),
            &mut history,
        )
        .await;

    let status = &snapshot.sites[0];
    assert_eq!(status.status, CheckStatus::Unchanged);
    assert!(status.encrypted);
    // 明文URL不得出现在状态快照中
    assert_eq!(status.url, token);
}

/// 解密失败与抓取失败同等隔离：坏令牌只拖垮自己
#[tokio::test]
async fn test_decrypt_failure_is_isolated() {
    let server = MockServer::start().await;
    mount_page(&server, "/ok", "<html><body>Fine</body></html>").await;

    let mut broken = site("broken", "definitely-not-a-token");
    broken.encrypted = true;
    let sites = vec![broken, site("ok", &format!("{}/ok", server.uri()))];

    let mut history = HistoryLog::default();
    let snapshot = worker()
        .run(&sites, &StatusSnapshot::default(), &mut history)
        .await;

    assert_eq!(snapshot.sites[0].status, CheckStatus::Error);
    assert!(snapshot.sites[0].error.is_some());
    assert!(history.entries("broken").is_empty());
    assert_eq!(snapshot.sites[1].status, CheckStatus::Unchanged);
}

/// 选择器与排除选择器在流水线中生效：页面其余部分的变化
/// 不影响选中范围的指纹
#[tokio::test]
async fn test_selector_scoped_detection() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/scoped",
        r#"<html><body>
            <nav>menu v1</nav>
            <article>Stable body<div class="ads">ad #1</div></article>
        </body></html>"#,
    )
    .await;

    let mut scoped = site("scoped", &format!("{}/scoped", server.uri()));
    scoped.selector = Some("article".to_string());
    scoped.exclude_selectors = vec![".ads".to_string()];
    let sites = vec![scoped];

    let worker = worker();
    let mut history = HistoryLog::default();
    let first = worker
        .run(&sites, &StatusSnapshot::default(), &mut history)
        .await;

    // 导航和广告都变了，正文没变
    server.reset().await;
    mount_page(
        &server,
        "/scoped",
        r#"<html><body>
            <nav>menu v2 totally different</nav>
            <article>Stable body<div class="ads">ad #2</div></article>
        </body></html>"#,
    )
    .await;

    let second = worker.run(&sites, &first, &mut history).await;
    assert_eq!(second.sites[0].status, CheckStatus::Unchanged);
    assert_eq!(second.sites[0].hash, first.sites[0].hash);
}
