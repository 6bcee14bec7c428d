//! # 像素通道隐写模块
//!
//! 按行优先、R, G, B 的固定顺序遍历通道样本，用每个样本的最低有效位承载 1 bit。
//! 所有函数均为纯函数：不持有状态，不记录日志，失败时不产生任何部分输出。

use crate::bitstream::{CodecOptions, Framing, decode_with, encode_with, pack_bits};
use crate::constants::{BITS_PER_BYTE, LENGTH_PREFIX_BITS, TERMINATOR, TERMINATOR_BITS};
use crate::error::{Result, StegoError};
use crate::raw_image::RawImage;

/// 提取过程的扫描状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    /// 终止符首次出现时，其之前负载的位数。
    TerminatorFound(usize),
    Exhausted,
}

/// 使用默认选项将消息隐藏到图像中。
pub fn embed(image: &RawImage, message: &str) -> Result<RawImage> {
    embed_with(image, message, CodecOptions::default())
}

/// 将消息编码后写入图像副本的通道样本最低位，原图保持不变。
///
/// # Errors
///
/// * 消息无法按所选编码表示时返回编码错误。
/// * 位数超过 `width * height * 3` 时返回 [`StegoError::Capacity`]，不做任何部分嵌入。
pub fn embed_with(image: &RawImage, message: &str, options: CodecOptions) -> Result<RawImage> {
    let bits = encode_with(message, options)?;

    let available = image.capacity();
    if bits.len() > available {
        return Err(StegoError::Capacity {
            required: bits.len(),
            available,
        });
    }

    let mut doctored = image.clone();
    write_lsbs(doctored.samples_mut(), bits.iter());
    Ok(doctored)
}

/// 使用默认选项从图像中恢复消息。
pub fn extract(image: &RawImage) -> Result<String> {
    extract_with(image, CodecOptions::default())
}

/// 从图像的通道样本最低位恢复消息。
///
/// # Errors
///
/// 找不到终止符 (或长度前缀超出图像容量) 时返回 [`StegoError::NotFound`]。
pub fn extract_with(image: &RawImage, options: CodecOptions) -> Result<String> {
    let payload = match options.framing {
        Framing::Terminator => scan_to_terminator(image.samples())?,
        Framing::LengthPrefixed => read_length_prefixed(image.samples())?,
    };

    Ok(decode_with(&payload, options.encoding))
}

/// 图像可承载的总位数。
pub fn capacity_bits(image: &RawImage) -> usize {
    image.capacity()
}

/// 在给定分帧方式下最多可隐藏的负载字节数。
pub fn max_message_bytes(image: &RawImage, options: CodecOptions) -> usize {
    image
        .capacity()
        .saturating_sub(options.framing.overhead_bits())
        / BITS_PER_BYTE
}

fn write_lsbs(samples: &mut [u8], bits: impl Iterator<Item = bool>) {
    samples
        .iter_mut()
        .zip(bits)
        .for_each(|(sample, bit)| *sample = (*sample & 0xFE) | u8::from(bit));
}

fn lsbs(samples: &[u8]) -> impl Iterator<Item = bool> + '_ {
    samples.iter().map(|&sample| sample & 1 == 1)
}

/// 逐位累积最低位，并用 16 位移位寄存器检测终止符，命中即停止。
fn scan_to_terminator(samples: &[u8]) -> Result<Vec<bool>> {
    let mut payload = Vec::new();
    let mut window: u16 = 0;
    let mut bits = lsbs(samples);
    let mut state = ScanState::Scanning;

    while state == ScanState::Scanning {
        state = match bits.next() {
            Some(bit) => {
                payload.push(bit);
                window = (window << 1) | u16::from(bit);
                if payload.len() >= TERMINATOR_BITS && window == TERMINATOR {
                    ScanState::TerminatorFound(payload.len() - TERMINATOR_BITS)
                } else {
                    ScanState::Scanning
                }
            }
            None => ScanState::Exhausted,
        };
    }

    match state {
        ScanState::TerminatorFound(end) => {
            payload.truncate(end);
            Ok(payload)
        }
        ScanState::Scanning | ScanState::Exhausted => Err(StegoError::NotFound),
    }
}

fn read_length_prefixed(samples: &[u8]) -> Result<Vec<bool>> {
    let prefix = samples
        .get(..LENGTH_PREFIX_BITS)
        .ok_or(StegoError::NotFound)?;
    let prefix: Vec<bool> = lsbs(prefix).collect();
    let len = pack_bits(&prefix) as usize;

    let end = len
        .checked_mul(BITS_PER_BYTE)
        .and_then(|bits| bits.checked_add(LENGTH_PREFIX_BITS))
        .ok_or(StegoError::NotFound)?;
    let body = samples
        .get(LENGTH_PREFIX_BITS..end)
        .ok_or(StegoError::NotFound)?;

    Ok(lsbs(body).collect())
}
