//! Native pixel layout normalization.
//!
//! Each OS backend hands back pixels in its native layout: GDI produces
//! bottom-up-capable 24-bit B-G-R rows padded to 4-byte boundaries,
//! CoreGraphics produces 32-bit B-G-R-A rows with a platform-defined
//! `bytes_per_row`, and the X protocol produces packed pixels that must be
//! decoded through the visual's red/green/blue masks. Everything is
//! converted here, once, at the backend boundary, so the public contract
//! is always top-down, tightly packed RGB8.

use framegrab_common::{FramegrabError, FramegrabResult};

use crate::ScreenDimensions;

/// DIB row stride for the given width and bit depth: rows are padded to a
/// 4-byte boundary, so this is `((width * bpp + 31) / 32) * 4`, not
/// `width * bpp / 8`.
pub fn dib_row_stride(width: u32, bits_per_pixel: u32) -> usize {
    (width as usize * bits_per_pixel as usize).div_ceil(32) * 4
}

/// Byte order of packed pixels in a native image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelByteOrder {
    LittleEndian,
    BigEndian,
}

/// Red/green/blue bit masks for a packed pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl ChannelMasks {
    /// The dominant 32-bit direct-color layout: 8 bits per channel,
    /// red in the high byte of the low 24 bits.
    pub const RGB888: Self = Self {
        red: 0x00ff_0000,
        green: 0x0000_ff00,
        blue: 0x0000_00ff,
    };

    /// Decode one packed pixel to `[r, g, b]`.
    pub fn decode(&self, pixel: u32) -> [u8; 3] {
        [
            extract_channel(pixel, self.red),
            extract_channel(pixel, self.green),
            extract_channel(pixel, self.blue),
        ]
    }
}

/// Extract one channel through its mask and scale it to 8 bits.
fn extract_channel(pixel: u32, mask: u32) -> u8 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let max = mask >> shift;
    let value = (pixel & mask) >> shift;
    let width = 32 - max.leading_zeros();
    if width == 8 {
        value as u8
    } else if width > 8 {
        (value >> (width - 8)) as u8
    } else {
        // Narrow channels (e.g. 5-bit in RGB565) expand to the full range.
        ((value * 255) / max) as u8
    }
}

/// Validate a native buffer against its declared geometry.
///
/// The final row is allowed to be unpadded; some producers size the buffer
/// as `stride * (height - 1) + row_bytes`.
fn check_native_buffer(
    data: &[u8],
    dimensions: ScreenDimensions,
    stride: usize,
    row_bytes: usize,
) -> FramegrabResult<()> {
    if stride < row_bytes {
        return Err(FramegrabError::invalid_frame(format!(
            "row stride {stride} is smaller than {row_bytes} bytes of pixel data per row"
        )));
    }
    let height = dimensions.height as usize;
    let required = if height == 0 {
        0
    } else {
        stride * (height - 1) + row_bytes
    };
    if data.len() < required {
        return Err(FramegrabError::invalid_frame(format!(
            "native buffer holds {} bytes, need {required} for {dimensions} at stride {stride}",
            data.len()
        )));
    }
    Ok(())
}

/// Convert top-down 24-bit B-G-R rows with alignment padding (the GDI DIB
/// layout, captured with a negative `biHeight`) to tight RGB8.
pub fn bgr24_to_rgb(
    data: &[u8],
    dimensions: ScreenDimensions,
    stride: usize,
) -> FramegrabResult<Vec<u8>> {
    let row_bytes = dimensions.width as usize * 3;
    check_native_buffer(data, dimensions, stride, row_bytes)?;

    let mut rgb = Vec::with_capacity(dimensions.frame_len());
    for y in 0..dimensions.height as usize {
        let row = &data[y * stride..y * stride + row_bytes];
        for bgr in row.chunks_exact(3) {
            rgb.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
        }
    }
    Ok(rgb)
}

/// Convert top-down 32-bit B-G-R-A rows with a platform-defined stride
/// (the CoreGraphics image layout) to tight RGB8. The alpha/padding byte
/// is dropped.
pub fn bgra32_to_rgb(
    data: &[u8],
    dimensions: ScreenDimensions,
    stride: usize,
) -> FramegrabResult<Vec<u8>> {
    let row_bytes = dimensions.width as usize * 4;
    check_native_buffer(data, dimensions, stride, row_bytes)?;

    let mut rgb = Vec::with_capacity(dimensions.frame_len());
    for y in 0..dimensions.height as usize {
        let row = &data[y * stride..y * stride + row_bytes];
        for bgra in row.chunks_exact(4) {
            rgb.extend_from_slice(&[bgra[2], bgra[1], bgra[0]]);
        }
    }
    Ok(rgb)
}

/// Convert packed pixels (the X protocol ZPixmap layout) to tight RGB8 by
/// decoding each pixel through the visual's channel masks.
pub fn masked_to_rgb(
    data: &[u8],
    dimensions: ScreenDimensions,
    stride: usize,
    bytes_per_pixel: usize,
    masks: ChannelMasks,
    byte_order: PixelByteOrder,
) -> FramegrabResult<Vec<u8>> {
    if !(1..=4).contains(&bytes_per_pixel) {
        return Err(FramegrabError::invalid_frame(format!(
            "unsupported packed pixel size: {bytes_per_pixel} bytes"
        )));
    }
    let row_bytes = dimensions.width as usize * bytes_per_pixel;
    check_native_buffer(data, dimensions, stride, row_bytes)?;

    let mut rgb = Vec::with_capacity(dimensions.frame_len());
    for y in 0..dimensions.height as usize {
        let row = &data[y * stride..y * stride + row_bytes];
        for packed in row.chunks_exact(bytes_per_pixel) {
            let mut pixel: u32 = 0;
            match byte_order {
                PixelByteOrder::LittleEndian => {
                    for (i, &byte) in packed.iter().enumerate() {
                        pixel |= (byte as u32) << (8 * i);
                    }
                }
                PixelByteOrder::BigEndian => {
                    for &byte in packed {
                        pixel = (pixel << 8) | byte as u32;
                    }
                }
            }
            rgb.extend_from_slice(&masks.decode(pixel));
        }
    }

    debug_assert_eq!(rgb.len(), dimensions.frame_len());
    Ok(rgb)
}
