//! # lsb_text 库
//!
//! 本库包含 LSB 文本隐写的核心逻辑：位流编解码、像素通道嵌入与提取，
//! 以及命令行工具使用的参数定义和处理函数。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod raw_image;
pub mod steganography;

pub use bitstream::{BitStream, CodecOptions, Framing, TextEncoding, decode, encode};
pub use error::{Result, StegoError};
pub use raw_image::RawImage;
pub use steganography::{embed, embed_with, extract, extract_with};
