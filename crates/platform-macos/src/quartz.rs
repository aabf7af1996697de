//! CoreGraphics primary-display capture.

use core_foundation::data::CFData;
use core_graphics::display::CGDisplay;
use core_graphics::image::CGImage;
use foreign_types::ForeignType;
use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{bgra32_to_rgb, Frame, ScreenDimensions};

// CGBitmapInfo fields (CGImage.h). The byte-order component lives in bits
// 12-14, the alpha component in the low five bits.
const BITMAP_BYTE_ORDER_MASK: u32 = 0x7000;
const BITMAP_BYTE_ORDER_32_LITTLE: u32 = 2 << 12;
const BITMAP_ALPHA_INFO_MASK: u32 = 0x1f;
// CGImageAlphaInfo values that put the alpha (or skipped) byte first in the
// packed 32-bit pixel, which on a little-endian host lays out as B-G-R-A.
const ALPHA_PREMULTIPLIED_FIRST: u32 = 2;
const ALPHA_FIRST: u32 = 4;
const ALPHA_NONE_SKIP_FIRST: u32 = 6;

/// Query the main display's current size in pixels.
pub fn primary_display_dimensions() -> FramegrabResult<ScreenDimensions> {
    let display = CGDisplay::main();
    let width = display.pixels_wide() as u32;
    let height = display.pixels_high() as u32;
    if width == 0 || height == 0 {
        return Err(FramegrabError::display_query(format!(
            "CoreGraphics reported {width}x{height} for the main display"
        )));
    }
    Ok(ScreenDimensions::new(width, height))
}

/// Capture the main display, normalized to RGB8.
///
/// The image CoreGraphics hands back is authoritative for geometry: on
/// scaled display modes its pixel size can differ from the queried
/// dimensions, and the frame reports the size that was actually captured.
pub fn capture_primary_display(dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
    let display = CGDisplay::main();
    let image = display.image().ok_or_else(|| {
        FramegrabError::capture_unavailable(
            "CGDisplayCreateImage returned no image (screen recording permission denied?)",
        )
    })?;

    let captured = ScreenDimensions::new(image.width() as u32, image.height() as u32);
    if captured != dimensions {
        tracing::debug!(
            requested = %dimensions,
            captured = %captured,
            "display image size differs from queried dimensions"
        );
    }

    validate_bitmap_layout(image.bits_per_pixel(), bitmap_info(&image))?;
    let stride = image.bytes_per_row();

    // Copies the provider's bytes; released when `data` drops.
    let data: CFData = image.data();
    let rgb = bgra32_to_rgb(data.bytes(), captured, stride)?;
    Frame::from_rgb(captured, rgb)
}

/// Read the image's `CGBitmapInfo` flags. Not wrapped by the
/// `core-graphics` crate.
fn bitmap_info(image: &CGImage) -> u32 {
    extern "C" {
        fn CGImageGetBitmapInfo(image: *mut std::ffi::c_void) -> u32;
    }
    unsafe { CGImageGetBitmapInfo(image.as_ptr().cast()) }
}

/// Accept only the layouts `bgra32_to_rgb` understands: 32 bits per pixel,
/// little-endian packing, alpha (or a skipped byte) first. Anything else
/// would silently swizzle channels, so it is rejected outright.
fn validate_bitmap_layout(bits_per_pixel: usize, bitmap_info: u32) -> FramegrabResult<()> {
    if bits_per_pixel != 32 {
        return Err(FramegrabError::capture_unavailable(format!(
            "unexpected display image depth: {bits_per_pixel} bits per pixel"
        )));
    }
    if bitmap_info & BITMAP_BYTE_ORDER_MASK != BITMAP_BYTE_ORDER_32_LITTLE {
        return Err(FramegrabError::capture_unavailable(format!(
            "unexpected display image byte order (CGBitmapInfo {bitmap_info:#06x})"
        )));
    }
    let alpha = bitmap_info & BITMAP_ALPHA_INFO_MASK;
    if !matches!(
        alpha,
        ALPHA_PREMULTIPLIED_FIRST | ALPHA_FIRST | ALPHA_NONE_SKIP_FIRST
    ) {
        return Err(FramegrabError::capture_unavailable(format!(
            "unexpected display image alpha layout (CGBitmapInfo {bitmap_info:#06x})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPLAY_IMAGE_INFO: u32 = BITMAP_BYTE_ORDER_32_LITTLE | ALPHA_NONE_SKIP_FIRST;

    #[test]
    fn little_endian_bgra_layout_is_accepted() {
        assert!(validate_bitmap_layout(32, DISPLAY_IMAGE_INFO).is_ok());
        let premultiplied = BITMAP_BYTE_ORDER_32_LITTLE | ALPHA_PREMULTIPLIED_FIRST;
        assert!(validate_bitmap_layout(32, premultiplied).is_ok());
    }

    #[test]
    fn big_endian_layout_is_rejected() {
        let big_endian = (4 << 12) | ALPHA_NONE_SKIP_FIRST;
        let err = validate_bitmap_layout(32, big_endian).unwrap_err();
        assert!(matches!(err, FramegrabError::CaptureUnavailable { .. }));
        // Default byte order means host-endianness is unspecified in the
        // flags, so it is rejected as well.
        let default_order = ALPHA_NONE_SKIP_FIRST;
        assert!(validate_bitmap_layout(32, default_order).is_err());
    }

    #[test]
    fn alpha_last_layout_is_rejected() {
        // PremultipliedLast (1): R-G-B-A in the packed value, not B-G-R-A
        // in memory.
        let rgba = BITMAP_BYTE_ORDER_32_LITTLE | 1;
        assert!(validate_bitmap_layout(32, rgba).is_err());
    }

    #[test]
    fn non_32bpp_depth_is_rejected() {
        let err = validate_bitmap_layout(16, DISPLAY_IMAGE_INFO).unwrap_err();
        assert!(matches!(err, FramegrabError::CaptureUnavailable { .. }));
    }
}
