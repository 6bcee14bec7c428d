//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::bitstream::{CodecOptions, Framing, TextEncoding};
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，将文本逐位写入 RGB 图像的通道样本并可无损恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，将文本逐位写入 RGB 图像的通道样本，结果始终保存为无损的 PNG。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 提高日志详细程度 (-v: debug, -vv: trace)。
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// 只输出错误日志。
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => log::LevelFilter::Error,
            (false, 0) => log::LevelFilter::Warn,
            (false, 1) => log::LevelFilter::Debug,
            (false, _) => log::LevelFilter::Trace,
        }
    }
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文本文件内容隐藏到图像中，结果保存为 PNG。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 显示图像可承载的位数和最大文本字节数。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (PNG, BMP, TIFF, WebP, QOI)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 结果图像的输出路径，默认为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 嵌入前将图像等比缩小，使宽高均不超过该像素值。
    #[arg(long, value_name = "PIXELS")]
    pub max_size: Option<u32>,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本的输出路径，默认为图像旁的 `recovered_<名称>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 隐藏与恢复时必须一致的编解码选项。
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct CodecArgs {
    /// 字符编码方式。
    #[arg(long, value_enum, default_value_t = EncodingArg::Latin1)]
    pub encoding: EncodingArg,

    /// 消息结尾的界定方式。
    #[arg(long, value_enum, default_value_t = FramingArg::Terminator)]
    pub framing: FramingArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodingArg {
    /// 每个字符一个字节，仅支持码点 0-255。
    #[default]
    Latin1,
    /// UTF-8 字节，支持任意文本。
    Utf8,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FramingArg {
    /// 16 位终止符 `1111111111111110`。
    #[default]
    Terminator,
    /// 32 位长度前缀。
    LengthPrefixed,
}

impl From<EncodingArg> for TextEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Latin1 => TextEncoding::Latin1,
            EncodingArg::Utf8 => TextEncoding::Utf8,
        }
    }
}

impl From<FramingArg> for Framing {
    fn from(arg: FramingArg) -> Self {
        match arg {
            FramingArg::Terminator => Framing::Terminator,
            FramingArg::LengthPrefixed => Framing::LengthPrefixed,
        }
    }
}

impl From<CodecArgs> for CodecOptions {
    fn from(args: CodecArgs) -> Self {
        CodecOptions {
            encoding: args.encoding.into(),
            framing: args.framing.into(),
        }
    }
}
