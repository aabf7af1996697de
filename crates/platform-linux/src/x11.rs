//! X11 primary-screen capture.
//!
//! Each call opens a fresh connection, issues `GetImage` (ZPixmap, all
//! planes) against the root window, and decodes the packed pixels through
//! the root visual's channel masks. The connection is dropped before the
//! call returns, so repeated captures cannot leak server resources.

use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{
    masked_to_rgb, ChannelMasks, Frame, PixelByteOrder, ScreenDimensions,
};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt as _, ImageFormat, ImageOrder, Screen, Visualid};
use x11rb::rust_connection::RustConnection;

/// Query the default screen's current size in pixels.
pub fn primary_screen_dimensions() -> FramegrabResult<ScreenDimensions> {
    let (conn, screen_num) = connect()?;
    let screen = default_screen(&conn, screen_num)?;
    Ok(ScreenDimensions::new(
        screen.width_in_pixels.into(),
        screen.height_in_pixels.into(),
    ))
}

/// Capture the default screen's root window, normalized to RGB8.
pub fn capture_primary_screen(dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
    let (conn, screen_num) = connect()?;
    let setup = conn.setup();
    let screen = default_screen(&conn, screen_num)?;
    let root = screen.root;

    let width = request_extent(dimensions.width)?;
    let height = request_extent(dimensions.height)?;

    let reply = conn
        .get_image(ImageFormat::Z_PIXMAP, root, 0, 0, width, height, !0)
        .map_err(|e| {
            FramegrabError::capture_unavailable(format!("GetImage request failed: {e}"))
        })?
        .reply()
        .map_err(|e| {
            FramegrabError::capture_unavailable(format!("GetImage returned no image: {e}"))
        })?;

    let masks = visual_masks(screen, reply.visual)?;

    // The wire format of a ZPixmap row comes from the pixmap format
    // matching the image depth, not from width * depth.
    let format = setup
        .pixmap_formats
        .iter()
        .find(|f| f.depth == reply.depth)
        .ok_or_else(|| {
            FramegrabError::capture_unavailable(format!(
                "no pixmap format advertised for depth {}",
                reply.depth
            ))
        })?;
    if format.bits_per_pixel % 8 != 0 || format.scanline_pad == 0 {
        return Err(FramegrabError::capture_unavailable(format!(
            "unsupported pixmap format: {} bpp, scanline pad {}",
            format.bits_per_pixel, format.scanline_pad
        )));
    }
    let stride = scanline_stride(
        dimensions.width as usize * format.bits_per_pixel as usize,
        format.scanline_pad as usize,
    );

    let byte_order = if setup.image_byte_order == ImageOrder::LSB_FIRST {
        PixelByteOrder::LittleEndian
    } else {
        PixelByteOrder::BigEndian
    };

    tracing::debug!(
        depth = reply.depth,
        bits_per_pixel = format.bits_per_pixel,
        stride,
        ?byte_order,
        "decoding ZPixmap capture"
    );

    let rgb = masked_to_rgb(
        &reply.data,
        dimensions,
        stride,
        format.bits_per_pixel as usize / 8,
        masks,
        byte_order,
    )?;
    Frame::from_rgb(dimensions, rgb)
}

fn connect() -> FramegrabResult<(RustConnection, usize)> {
    x11rb::connect(None).map_err(|e| {
        FramegrabError::resource_acquisition(format!(
            "cannot connect to X server (is DISPLAY set?): {e}"
        ))
    })
}

fn default_screen(conn: &RustConnection, screen_num: usize) -> FramegrabResult<&Screen> {
    conn.setup().roots.get(screen_num).ok_or_else(|| {
        FramegrabError::display_query(format!(
            "X server setup has no screen at index {screen_num}"
        ))
    })
}

/// Look up the RGB masks of the visual the image was captured with.
fn visual_masks(screen: &Screen, visual: Visualid) -> FramegrabResult<ChannelMasks> {
    let visual_type = screen
        .allowed_depths
        .iter()
        .flat_map(|depth| depth.visuals.iter())
        .find(|v| v.visual_id == visual)
        .ok_or_else(|| {
            FramegrabError::capture_unavailable(format!(
                "image visual {visual} not found in the screen's allowed depths"
            ))
        })?;

    let masks = ChannelMasks {
        red: visual_type.red_mask,
        green: visual_type.green_mask,
        blue: visual_type.blue_mask,
    };
    if masks.red == 0 && masks.green == 0 && masks.blue == 0 {
        return Err(FramegrabError::capture_unavailable(
            "root visual carries no RGB masks (non-direct-color visual)",
        ));
    }
    Ok(masks)
}

/// Row stride in bytes for a scanline padded to `pad_bits`.
fn scanline_stride(row_bits: usize, pad_bits: usize) -> usize {
    row_bits.div_ceil(pad_bits) * pad_bits / 8
}

fn request_extent(value: u32) -> FramegrabResult<u16> {
    u16::try_from(value).map_err(|_| {
        FramegrabError::invalid_frame(format!("capture extent {value} exceeds the X11 maximum"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanline_stride_respects_padding() {
        // 32 bpp, pad 32: stride is exactly width * 4.
        assert_eq!(scanline_stride(1920 * 32, 32), 1920 * 4);
        // 24 bpp, pad 32: 3-pixel rows round up to the next 32-bit unit.
        assert_eq!(scanline_stride(3 * 24, 32), 12);
        // 16 bpp, pad 16.
        assert_eq!(scanline_stride(5 * 16, 16), 10);
    }
}
