//! # 错误类型模块
//!
//! 隐写编解码器返回的所有错误都是纯值，调用方决定如何向用户呈现。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StegoError {
    /// 消息编码后的位数超过图像容量。
    #[error("Not enough space in the image: required {required} bits, available {available} bits")]
    Capacity { required: usize, available: usize },

    /// 扫描完所有通道样本仍未找到隐藏消息。
    #[error("No hidden message found or message is corrupted")]
    NotFound,

    /// Latin-1 编码下无法用单个字节表示的字符。
    #[error("Character {character:?} at position {position} cannot be encoded as a single byte")]
    UnsupportedCharacter { character: char, position: usize },

    /// 负载长度超出 32 位长度前缀可描述的范围。
    #[error("Payload of {bytes} bytes is too large for a 32-bit length prefix")]
    PayloadTooLarge { bytes: usize },

    #[error(
        "Sample buffer of {actual} bytes does not match a {width}x{height} RGB image ({expected} bytes)"
    )]
    InvalidDimensions {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// 输入数据无法被解析为图像。
    #[error("Unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, StegoError>;
