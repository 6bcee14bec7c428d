use lsb_text::{
    CodecOptions, Framing, RawImage, StegoError, TextEncoding, decode, embed, embed_with, encode,
    extract, extract_with,
    steganography::{capacity_bits, max_message_bytes},
};
use rand::RngCore;

/// 创建一张带随机样本的 RGB 原始图像
fn random_image(width: u32, height: u32) -> RawImage {
    let mut samples = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut samples);
    RawImage::new(width, height, samples).expect("valid dimensions")
}

/// 创建一张所有样本最低位都为 0 的图像，不可能包含终止符
fn blank_image(width: u32, height: u32) -> RawImage {
    RawImage::new(width, height, vec![0x80; (width * height * 3) as usize])
        .expect("valid dimensions")
}

#[test]
fn test_hi_round_trips_through_ten_by_ten_image() {
    let image = random_image(10, 10);
    assert_eq!(capacity_bits(&image), 300);

    let doctored = embed(&image, "hi").unwrap();
    assert_eq!(extract(&doctored).unwrap(), "hi");
}

#[test]
fn test_two_by_two_image_reports_capacity_error() {
    let image = random_image(2, 2);

    match embed(&image, "hi") {
        Err(StegoError::Capacity {
            required,
            available,
        }) => {
            assert_eq!(required, 32);
            assert_eq!(available, 12);
        }
        other => panic!("expected a capacity error, got {other:?}"),
    }
}

#[test]
fn test_capacity_boundary() {
    // 7 个字符 + 终止符 = 72 bits = 24 像素，恰好用满
    let message = "exactly";
    assert_eq!(encode(message).unwrap().len(), 72);
    let full = random_image(24, 1);
    let doctored = embed(&full, message).unwrap();
    assert_eq!(extract(&doctored).unwrap(), message);

    // 3 个字符 + 终止符 = 40 bits，13 像素只有 39 个样本
    let message = "abc";
    assert_eq!(encode(message).unwrap().len(), 40);
    assert!(matches!(
        embed(&random_image(13, 1), message),
        Err(StegoError::Capacity {
            required: 40,
            available: 39
        })
    ));
}

#[test]
fn test_failed_embed_leaves_original_untouched() {
    let image = random_image(3, 3);
    let before = image.samples().to_vec();

    assert!(embed(&image, "this message is far too long").is_err());
    assert_eq!(image.samples(), before.as_slice());
}

#[test]
fn test_successful_embed_does_not_mutate_source() {
    let image = random_image(10, 10);
    let before = image.clone();

    let doctored = embed(&image, "hi").unwrap();
    assert_eq!(image, before);
    assert_eq!(doctored.width(), 10);
    assert_eq!(doctored.height(), 10);
}

#[test]
fn test_only_leading_samples_change_and_only_in_lsb() {
    let image = random_image(10, 10);
    let bits = encode("hi").unwrap();
    let doctored = embed(&image, "hi").unwrap();

    for (index, (&old, &new)) in image.samples().iter().zip(doctored.samples()).enumerate() {
        assert_eq!(old & 0xFE, new & 0xFE, "upper bits changed at sample {index}");
        if index >= bits.len() {
            assert_eq!(old, new, "sample {index} beyond the payload changed");
        }
    }

    // 样本按 R, G, B 顺序承载位流
    let written: String = doctored.samples()[..bits.len()]
        .iter()
        .map(|&sample| if sample & 1 == 1 { '1' } else { '0' })
        .collect();
    assert_eq!(written, bits.to_string());
}

#[test]
fn test_extract_without_terminator_is_not_found() {
    let image = blank_image(20, 20);
    assert!(matches!(extract(&image), Err(StegoError::NotFound)));

    let empty = RawImage::new(0, 0, Vec::new()).unwrap();
    assert!(matches!(extract(&empty), Err(StegoError::NotFound)));
}

#[test]
fn test_empty_message_round_trips() {
    let image = blank_image(4, 4);
    let doctored = embed(&image, "").unwrap();
    assert_eq!(extract(&doctored).unwrap(), "");
}

#[test]
fn test_embedding_into_original_again_yields_latest_message() {
    let image = random_image(16, 16);

    let first = embed(&image, "message A").unwrap();
    assert_eq!(extract(&first).unwrap(), "message A");

    let second = embed(&image, "B").unwrap();
    assert_eq!(extract(&second).unwrap(), "B");

    // 在已隐写的图像上再次嵌入，只要求不崩溃
    let _ = embed(&first, "B").map(|twice| extract(&twice));
}

#[test]
fn test_latin1_rejects_wide_characters() {
    let image = random_image(10, 10);
    match embed(&image, "5€") {
        Err(StegoError::UnsupportedCharacter {
            character,
            position,
        }) => {
            assert_eq!(character, '€');
            assert_eq!(position, 1);
        }
        other => panic!("expected an unsupported character error, got {other:?}"),
    }
}

#[test]
fn test_latin1_upper_half_round_trips() {
    let image = random_image(10, 10);
    let doctored = embed(&image, "ÿé").unwrap();
    assert_eq!(extract(&doctored).unwrap(), "ÿé");
}

#[test]
fn test_utf8_round_trips_non_latin_text() {
    let options = CodecOptions {
        encoding: TextEncoding::Utf8,
        ..Default::default()
    };
    let image = random_image(20, 20);
    let message = "隐写 €5";

    let bits = lsb_text::bitstream::encode_with(message, options).unwrap();
    assert_eq!(bits.len(), message.len() * 8 + 16);

    let doctored = embed_with(&image, message, options).unwrap();
    assert_eq!(extract_with(&doctored, options).unwrap(), message);
}

#[test]
fn test_terminator_collision_truncates_but_length_prefix_does_not() {
    // 0xFF 0xFE 的位模式就是终止符本身
    let message = "a\u{ff}\u{fe}b";
    let image = random_image(20, 20);

    let doctored = embed(&image, message).unwrap();
    assert_eq!(extract(&doctored).unwrap(), "a");

    let options = CodecOptions {
        framing: Framing::LengthPrefixed,
        ..Default::default()
    };
    let doctored = embed_with(&image, message, options).unwrap();
    assert_eq!(extract_with(&doctored, options).unwrap(), message);
}

#[test]
fn test_length_prefix_beyond_capacity_is_not_found() {
    let options = CodecOptions {
        framing: Framing::LengthPrefixed,
        ..Default::default()
    };
    // 所有最低位为 1 => 长度前缀为 u32::MAX
    let image = RawImage::new(20, 20, vec![0xFF; 1200]).unwrap();
    assert!(matches!(
        extract_with(&image, options),
        Err(StegoError::NotFound)
    ));

    let tiny = RawImage::new(2, 2, vec![0; 12]).unwrap();
    assert!(matches!(
        extract_with(&tiny, options),
        Err(StegoError::NotFound)
    ));
}

#[test]
fn test_max_message_bytes_matches_framing() {
    let image = random_image(10, 10);
    assert_eq!(max_message_bytes(&image, CodecOptions::default()), (300 - 16) / 8);

    let options = CodecOptions {
        framing: Framing::LengthPrefixed,
        ..Default::default()
    };
    assert_eq!(max_message_bytes(&image, options), (300 - 32) / 8);

    let message = "x".repeat(max_message_bytes(&image, CodecOptions::default()));
    assert!(embed(&image, &message).is_ok());
    assert_eq!(max_message_bytes(&random_image(1, 1), options), 0);
}

#[test]
fn test_raw_image_rejects_mismatched_buffer() {
    assert!(matches!(
        RawImage::new(2, 2, vec![0; 11]),
        Err(StegoError::InvalidDimensions {
            expected: 12,
            actual: 11,
            ..
        })
    ));
}

#[test]
fn test_decode_drops_partial_trailing_bits() {
    let bits = encode("ok").unwrap();
    // 去掉终止符后再多留 3 位
    let payload = &bits.as_slice()[..16 + 3];
    assert_eq!(decode(payload), "ok");
    assert_eq!(decode(&[]), "");
}

#[test]
fn test_round_trip_through_png_bytes() {
    let image = random_image(12, 7);
    let doctored = embed(&image, "lossless only").unwrap();

    let mut png = std::io::Cursor::new(Vec::new());
    doctored
        .to_rgb_image()
        .unwrap()
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();

    let reloaded = RawImage::from_encoded(png.get_ref()).unwrap();
    assert_eq!(reloaded, doctored);
    assert_eq!(extract(&reloaded).unwrap(), "lossless only");
}

#[test]
fn test_from_encoded_rejects_garbage() {
    assert!(matches!(
        RawImage::from_encoded(b"definitely not an image"),
        Err(StegoError::Decode(_))
    ));
}

#[test]
fn test_save_png_and_open_preserve_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carrier.png");

    let doctored = embed(&random_image(9, 5), "on disk").unwrap();
    doctored.save_png(&path).unwrap();

    let reopened = RawImage::open(&path).unwrap();
    assert_eq!(reopened, doctored);
    assert_eq!(extract(&reopened).unwrap(), "on disk");
}
