// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 内容规范化（content_normalizer）：提取可见文本并剥离易变噪声
/// - 变化检测（change_detector）：指纹计算与变化分类
/// - URL加密（url_cipher）：监控URL的静态加密与解密
///
/// 三个服务都是纯领域逻辑，不做任何IO，由工作器负责编排。
pub mod change_detector;
pub mod content_normalizer;
pub mod url_cipher;
