//! # 位流编解码模块
//!
//! 将文本消息转换为自定界的位序列，或从位序列还原文本。
//! 每个字节按高位在前展开为 8 bits，末尾追加终止符 (默认)，
//! 或在开头写入 32 位长度前缀 (可选)。

use crate::constants::{BITS_PER_BYTE, LENGTH_PREFIX_BITS, TERMINATOR, TERMINATOR_BITS};
use crate::error::{Result, StegoError};
use std::fmt;

/// 消息字符到字节的映射方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// 每个字符一个字节，码点必须位于 0..=255。
    #[default]
    Latin1,
    /// 按 UTF-8 字节嵌入，多字节字符会占用成倍的容量。
    Utf8,
}

/// 负载结尾的界定方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// 负载后追加 16 位终止符，提取时以首次出现为准。
    /// 若负载本身的位模式恰好包含终止符，提取结果会被提前截断。
    #[default]
    Terminator,
    /// 负载前写入大端 `u32` 字节数，不追加终止符。
    LengthPrefixed,
}

impl Framing {
    /// 分帧本身占用的位数。
    pub fn overhead_bits(self) -> usize {
        match self {
            Framing::Terminator => TERMINATOR_BITS,
            Framing::LengthPrefixed => LENGTH_PREFIX_BITS,
        }
    }
}

/// 编解码选项。默认值与最初的网页版行为一致。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    pub encoding: TextEncoding,
    pub framing: Framing,
}

/// 有序的位序列。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bits: Vec<bool>,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// 以高位在前的顺序追加 `value` 的低 `width` 位。
    fn push_word(&mut self, value: u32, width: usize) {
        (0..width)
            .rev()
            .for_each(|shift| self.bits.push((value >> shift) & 1 == 1));
    }

    fn extend_bytes(&mut self, bytes: &[u8]) {
        bytes
            .iter()
            .for_each(|&byte| self.push_word(u32::from(byte), BITS_PER_BYTE));
    }
}

impl From<Vec<bool>> for BitStream {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bits
            .iter()
            .try_for_each(|&bit| f.write_str(if bit { "1" } else { "0" }))
    }
}

/// 使用默认选项 (Latin-1, 终止符) 编码消息。
pub fn encode(message: &str) -> Result<BitStream> {
    encode_with(message, CodecOptions::default())
}

/// 将消息编码为位流。
///
/// # Errors
///
/// * Latin-1 模式下存在码点大于 255 的字符时返回 [`StegoError::UnsupportedCharacter`]。
/// * 长度前缀模式下负载超过 `u32::MAX` 字节时返回 [`StegoError::PayloadTooLarge`]。
pub fn encode_with(message: &str, options: CodecOptions) -> Result<BitStream> {
    let payload = message_bytes(message, options.encoding)?;
    let mut bits =
        BitStream::with_capacity(payload.len() * BITS_PER_BYTE + options.framing.overhead_bits());

    match options.framing {
        Framing::Terminator => {
            bits.extend_bytes(&payload);
            bits.push_word(u32::from(TERMINATOR), TERMINATOR_BITS);
        }
        Framing::LengthPrefixed => {
            let len = u32::try_from(payload.len()).map_err(|_| StegoError::PayloadTooLarge {
                bytes: payload.len(),
            })?;
            bits.push_word(len, LENGTH_PREFIX_BITS);
            bits.extend_bytes(&payload);
        }
    }

    Ok(bits)
}

/// 使用 Latin-1 解码纯负载位 (不含终止符)。
pub fn decode(bits: &[bool]) -> String {
    decode_with(bits, TextEncoding::Latin1)
}

/// 将负载位按 8 位一组还原为文本。末尾不足 8 位的部分被静默丢弃。
/// UTF-8 模式下非法序列以替换字符呈现，因此解码本身不会失败。
pub fn decode_with(bits: &[bool], encoding: TextEncoding) -> String {
    let bytes: Vec<u8> = bits
        .chunks_exact(BITS_PER_BYTE)
        .map(|group| pack_bits(group) as u8)
        .collect();

    match encoding {
        TextEncoding::Latin1 => bytes.into_iter().map(char::from).collect(),
        TextEncoding::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// 将至多 32 个高位在前的位组合为整数。
pub(crate) fn pack_bits(bits: &[bool]) -> u32 {
    bits.iter()
        .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit))
}

fn message_bytes(message: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    match encoding {
        TextEncoding::Latin1 => message
            .chars()
            .enumerate()
            .map(|(position, character)| {
                u8::try_from(character).map_err(|_| StegoError::UnsupportedCharacter {
                    character,
                    position,
                })
            })
            .collect(),
        TextEncoding::Utf8 => Ok(message.as_bytes().to_vec()),
    }
}
