//! # 原始图像模块
//!
//! `RawImage` 持有一块连续的 RGB8 样本缓冲区，按行优先、每像素 R, G, B 的顺序排列。
//! 这一顺序就是隐写时遍历的通道样本序列，嵌入与提取都直接在该切片上进行。

use crate::constants::CHANNELS_PER_PIXEL;
use crate::error::{Result, StegoError};
use image::{DynamicImage, RgbImage};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl RawImage {
    /// 从行优先的 RGB 样本缓冲区构造图像。
    ///
    /// # Errors
    ///
    /// 缓冲区长度不等于 `width * height * 3` 时返回 [`StegoError::InvalidDimensions`]。
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height);
        if expected != Some(samples.len()) {
            return Err(StegoError::InvalidDimensions {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 可承载的位数，每个通道样本 1 bit。
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// 通道样本序列 (行优先，R, G, B)。
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// 读取并解码图像文件，丢弃 alpha 通道，统一为 RGB8。
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(image::open(path)?.into())
    }

    /// 从内存中的已编码图像数据 (PNG, BMP 等) 构造。
    pub fn from_encoded(bytes: &[u8]) -> Result<Self> {
        Ok(image::load_from_memory(bytes)?.into())
    }

    /// 以 PNG 格式保存，保证样本值逐位不变。
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_rgb_image()?
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.samples.clone()).ok_or_else(|| {
            StegoError::InvalidDimensions {
                width: self.width,
                height: self.height,
                expected: sample_count(self.width, self.height).unwrap_or(usize::MAX),
                actual: self.samples.len(),
            }
        })
    }
}

impl From<RgbImage> for RawImage {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            samples: image.into_raw(),
        }
    }
}

impl From<DynamicImage> for RawImage {
    fn from(image: DynamicImage) -> Self {
        image.into_rgb8().into()
    }
}

fn sample_count(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS_PER_PIXEL)
}
