// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// 空白字符折叠
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
/// 日期噪声（YYYY-MM-DD）
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap());
/// 时间噪声（H:MM 或 H:MM:SS）
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}:\d{2}(?::\d{2})?\b").unwrap());
/// 计数噪声（<数字> views/comments/likes，不区分大小写）
static COUNTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d+\s*(?:views?|comments?|likes?)\b").unwrap());

/// 内容规范化错误
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// 配置中的CSS选择器无法解析
    #[error("无效的CSS选择器: {0}")]
    InvalidSelector(String),
}

/// 内容规范化器
///
/// 将抓取到的原始标记转换为不含易变噪声的规范文本：
/// 先提取可见文本（可按选择器限定范围、按排除选择器剔除子结构），
/// 再剥离日期、时间和浏览/评论/点赞计数等易变片段。
///
/// 规范化是幂等的：对自身输出再次规范化不产生任何变化。
/// 其目的是避免页面上的时间戳和计数器造成虚假的"已更新"判定。
pub struct ContentNormalizer;

impl ContentNormalizer {
    /// 规范化一段标记文本
    ///
    /// # 参数
    ///
    /// * `html` - 抓取到的原始标记
    /// * `selector` - 可选的内容选择器，限定提取范围
    /// * `exclude_selectors` - 排除选择器列表，提取前剔除匹配的子结构
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 规范化后的文本
    /// * `Err(NormalizeError)` - 选择器配置非法
    pub fn normalize(
        html: &str,
        selector: Option<&str>,
        exclude_selectors: &[String],
    ) -> Result<String, NormalizeError> {
        let document = Html::parse_document(html);

        let excludes = exclude_selectors
            .iter()
            .map(|raw| {
                Selector::parse(raw).map_err(|_| NormalizeError::InvalidSelector(raw.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut parts: Vec<String> = Vec::new();
        match selector {
            Some(raw) => {
                let content_selector = Selector::parse(raw)
                    .map_err(|_| NormalizeError::InvalidSelector(raw.to_string()))?;
                for element in document.select(&content_selector) {
                    collect_visible_text(element, &excludes, &mut parts);
                }
            }
            None => collect_visible_text(document.root_element(), &excludes, &mut parts),
        }

        Ok(Self::canonicalize(&parts.join(" ")))
    }

    /// 对已提取的文本做规范化处理
    ///
    /// 处理顺序：折叠空白 → 剥离日期 → 剥离时间 → 剥离计数短语
    /// → 再次折叠空白并去除首尾空格。
    pub fn canonicalize(text: &str) -> String {
        let collapsed = WHITESPACE_RE.replace_all(text, " ");
        let stripped = DATE_RE.replace_all(&collapsed, "");
        let stripped = TIME_RE.replace_all(&stripped, "");
        let stripped = COUNTER_RE.replace_all(&stripped, "");
        WHITESPACE_RE
            .replace_all(&stripped, " ")
            .trim()
            .to_string()
    }
}

/// 收集元素下的可见文本
///
/// 跳过被排除选择器命中的子树以及 script/style/noscript 元素。
fn collect_visible_text(element: ElementRef<'_>, excludes: &[Selector], out: &mut Vec<String>) {
    if excludes.iter().any(|sel| sel.matches(&element)) {
        return;
    }
    if matches!(element.value().name(), "script" | "style" | "noscript") {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_visible_text(child_element, excludes, out);
        }
    }
}
