// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! URL加密命令行工具
//!
//! 供运维方离线生成 sites.json 中的加密URL令牌：
//!
//! ```text
//! WATCHRS__CRYPTO__SECRET=... urlcipher encrypt https://example.com/private
//! WATCHRS__CRYPTO__SECRET=... urlcipher decrypt <token>
//! ```
//!
//! 用法错误或解密失败时以非零状态退出。

use std::env;
use std::process::ExitCode;

use watchrs::config::settings::Settings;
use watchrs::domain::services::url_cipher::UrlCipher;

fn print_usage() {
    eprintln!("Usage: urlcipher <encrypt|decrypt> <value>");
    eprintln!("  密钥通过环境变量 WATCHRS__CRYPTO__SECRET 提供");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        print_usage();
        return ExitCode::from(2);
    }

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("配置加载失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cipher = match UrlCipher::from_settings(&settings.crypto) {
        Ok(cipher) => cipher,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match args[1].as_str() {
        "encrypt" => {
            let token = cipher.encrypt(&args[2]);
            println!("Encrypted URL: {}", token);
            ExitCode::SUCCESS
        }
        "decrypt" => match cipher.decrypt(&args[2]) {
            Ok(url) => {
                println!("Decrypted URL: {}", url);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("解密失败: {}", e);
                ExitCode::FAILURE
            }
        },
        other => {
            eprintln!("Unknown action: {}", other);
            print_usage();
            ExitCode::from(2)
        }
    }
}
