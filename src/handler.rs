//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::bitstream::CodecOptions;
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_IMAGE_PREFIX, OUTPUT_EXTENSION, RECOVERED_TEXT_PREFIX};
use crate::error::StegoError;
use crate::raw_image::RawImage;
use crate::steganography::{capacity_bits, embed_with, extract_with, max_message_bytes};
use anyhow::{Context, Result};
use colored::Colorize;
use image::GenericImageView;
use image::imageops::FilterType;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本文件、按需缩小图像、调用隐写核心函数嵌入文本，
/// 最后将结果以 PNG 格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和编解码选项的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像，或无法读取文本文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像没有足够的空间来隐藏文本，或文本包含无法编码的字符。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args.dest.clone().unwrap_or_else(|| {
        default_output_path(&args.image, HIDDEN_IMAGE_PREFIX, OUTPUT_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let picture = load_image(&args.image, args.max_size)?;

    let text = fs::read_to_string(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;
    if text.is_empty() {
        warn!("Text file {} is empty; only the end marker will be hidden", args.text.display());
    }

    let options = CodecOptions::from(args.codec);
    debug!("Hiding {} characters with {:?}", text.chars().count(), options);

    let doctored = embed_with(&picture, &text, options).map_err(|err| match err {
        StegoError::Capacity {
            required,
            available,
        } => anyhow::anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context(format!(
            "Failed to hide the text from: {}",
            args.text.to_string_lossy().red().bold()
        )),
    })?;

    doctored.save_png(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    info!("Wrote {}x{} PNG to {}", doctored.width(), doctored.height(), dest.display());

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数获取隐藏的文本，
/// 最后将恢复的文本内容写入目标文本文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像中没有可识别的隐藏消息。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args.text.clone().unwrap_or_else(|| {
        default_output_path(&args.image, RECOVERED_TEXT_PREFIX, "txt")
    });
    ensure_writable(&dest, args.force)?;

    let picture = load_image(&args.image, None)?;

    let text = extract_with(&picture, args.codec.into()).with_context(|| {
        format!(
            "Failed to recover the text from '{}'. \nThe image may not contain a hidden message or the options differ from those used to hide it.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    debug!("Recovered {} characters", text.chars().count());

    fs::write(&dest, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：报告图像尺寸、可用位数以及最大可隐藏的文本字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_image(&args.image, None)?;
    let options = CodecOptions::from(args.codec);

    println!(
        "{}: {}x{} pixels, {} bits, up to {} bytes of text",
        args.image.to_string_lossy().bold(),
        picture.width(),
        picture.height(),
        capacity_bits(&picture).to_string().green().bold(),
        max_message_bytes(&picture, options).to_string().green().bold()
    );
    Ok(())
}

/// 生成默认输出路径：与输入文件同目录，文件名为 `<前缀><原文件名主干>.<扩展名>`。
pub fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 读取图像并统一为 RGB8；指定 `max_size` 时先等比缩小。
fn load_image(path: &Path, max_size: Option<u32>) -> Result<RawImage> {
    let mut decoded = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    if let Some(limit) = max_size {
        anyhow::ensure!(limit > 0, "--max-size must be greater than zero");
        if decoded.width() > limit || decoded.height() > limit {
            debug!(
                "Downscaling {}x{} to fit within {limit}x{limit}",
                decoded.width(),
                decoded.height()
            );
            decoded = decoded.resize(limit, limit, FilterType::Lanczos3);
        }
    }

    let picture = RawImage::from(decoded);
    info!(
        "Loaded {} ({}x{}, {} bits of capacity)",
        path.display(),
        picture.width(),
        picture.height(),
        picture.capacity()
    );
    Ok(picture)
}
