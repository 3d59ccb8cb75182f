// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;

use crate::config::settings::CryptoSettings;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// IV长度（AES块大小），密文令牌的前16字节
const IV_LEN: usize = 16;

/// 未配置密钥时的内置种子，仅在显式开启低安全模式后使用
const DEFAULT_KEY_SEED: &str = "watchrs-insecure-default-key";

/// 加解密错误类型
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("未配置加密密钥（设置 crypto.secret，或显式开启 crypto.allow_default_key）")]
    MissingSecret,

    #[error("Base64解码失败: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("密文长度不足")]
    CiphertextTooShort,

    #[error("解密失败: 密钥错误或填充不合法")]
    InvalidPadding,

    #[error("解密结果不是有效的UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// URL加密器
///
/// 使用口令派生的密钥对URL做对称加解密，保证监控目标在
/// 配置文件中保持机密。密钥为口令的SHA-256摘要，算法为
/// AES-256-CBC，每次加密生成新的随机IV并拼在密文前，整体
/// 以Base64编码为文本安全的令牌。
///
/// 同一输入两次加密得到不同令牌（IV不同），但都能解回原文。
pub struct UrlCipher {
    key: [u8; 32],
}

impl UrlCipher {
    /// 用运维方口令创建加密器
    pub fn new(secret: &str) -> Self {
        let key: [u8; 32] = Sha256::digest(secret.as_bytes()).into();
        Self { key }
    }

    /// 从配置创建加密器
    ///
    /// 未配置口令时必须显式开启 `crypto.allow_default_key` 才会
    /// 退回到内置默认密钥，并在日志中标记为低安全模式；否则
    /// 返回 [`CryptoError::MissingSecret`]。
    pub fn from_settings(settings: &CryptoSettings) -> Result<Self, CryptoError> {
        match settings.secret.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(Self::new(secret)),
            _ if settings.allow_default_key => {
                warn!("未配置加密密钥，使用内置默认密钥（低安全模式）");
                Ok(Self::new(DEFAULT_KEY_SEED))
            }
            _ => Err(CryptoError::MissingSecret),
        }
    }

    /// 加密URL，返回Base64令牌（IV ‖ 密文）
    pub fn encrypt(&self, plaintext: &str) -> String {
        let iv: [u8; IV_LEN] = rand::random();
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let mut packed = Vec::with_capacity(IV_LEN + ciphertext.len());
        packed.extend_from_slice(&iv);
        packed.extend_from_slice(&ciphertext);
        BASE64.encode(packed)
    }

    /// 解密Base64令牌，返回原始URL
    pub fn decrypt(&self, token: &str) -> Result<String, CryptoError> {
        let raw = BASE64.decode(token)?;
        if raw.len() <= IV_LEN {
            return Err(CryptoError::CiphertextTooShort);
        }

        let (iv, ciphertext) = raw.split_at(IV_LEN);
        let iv: [u8; IV_LEN] = iv
            .try_into()
            .map_err(|_| CryptoError::CiphertextTooShort)?;

        let plaintext = Aes256CbcDec::new(&self.key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::InvalidPadding)?;

        Ok(String::from_utf8(plaintext)?)
    }
}
