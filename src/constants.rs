/// 标记隐藏消息结束的 16 位终止符 `1111111111111110`。
/// 提取时以其首次出现的位置作为消息的结尾。
pub const TERMINATOR: u16 = 0b1111_1111_1111_1110;

/// 终止符占用的位数。
pub const TERMINATOR_BITS: usize = 16;

/// 每个像素参与隐写的通道数 (R, G, B)，每个通道样本承载 1 bit。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 每个字节编码为 8 bits，高位在前。
pub const BITS_PER_BYTE: usize = 8;

/// 长度前缀分帧模式下，描述负载字节数的大端 `u32` 占用的位数。
pub const LENGTH_PREFIX_BITS: usize = 32;

/// 无损输出格式。无论输入是何种格式，结果图像都以 PNG 保存。
pub const OUTPUT_EXTENSION: &str = "png";

/// 默认输出文件名前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";
