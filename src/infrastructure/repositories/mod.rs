// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 领域仓库接口的JSON文件实现：
/// - json_status_repo_impl：status.json 的读写
/// - json_history_repo_impl：history.json 的读写
pub mod json_history_repo_impl;
pub mod json_status_repo_impl;
