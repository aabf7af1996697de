//! GDI primary-display capture.
//!
//! A single capture acquires the screen DC, a compatible memory DC, and a
//! compatible bitmap, blits the screen into the bitmap, and reads it back
//! with `GetDIBits` as a 24-bit DIB. Passing a negative `biHeight` requests
//! top-down rows, so only the B-G-R order and the 4-byte row alignment are
//! left to normalize. Every handle is held by a guard so both success and
//! failure paths release in reverse acquisition order.

use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{bgr24_to_rgb, dib_row_stride, Frame, ScreenDimensions};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC,
    HGDIOBJ, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

/// Query the primary display's current size in pixels.
pub fn primary_display_dimensions() -> FramegrabResult<ScreenDimensions> {
    // GetSystemMetrics reports 0 on failure rather than setting last-error.
    let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };
    if width <= 0 || height <= 0 {
        return Err(FramegrabError::display_query(format!(
            "GetSystemMetrics reported {width}x{height} for the primary display"
        )));
    }
    Ok(ScreenDimensions::new(width as u32, height as u32))
}

/// Capture the primary display at the given dimensions, normalized to RGB8.
pub fn capture_primary_display(dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
    let width = dimensions.width as i32;
    let height = dimensions.height as i32;

    let screen = ScreenDc::acquire()?;
    let memory = MemoryDc::compatible_with(&screen)?;
    let bitmap = CompatibleBitmap::create(&screen, width, height)?;
    let _selected = SelectedBitmap::select(&memory, &bitmap)?;

    unsafe { BitBlt(memory.0, 0, 0, width, height, screen.0, 0, 0, SRCCOPY) }.map_err(|e| {
        FramegrabError::capture_unavailable(format!("BitBlt from screen DC failed: {e}"))
    })?;

    // Negative biHeight requests top-down rows; rows stay padded to 4 bytes.
    let stride = dib_row_stride(dimensions.width, 24);
    let mut native = vec![0u8; stride * dimensions.height as usize];
    let mut info = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height,
            biPlanes: 1,
            biBitCount: 24,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let copied = unsafe {
        GetDIBits(
            memory.0,
            bitmap.0,
            0,
            dimensions.height,
            Some(native.as_mut_ptr().cast()),
            &mut info,
            DIB_RGB_COLORS,
        )
    };
    if copied as u32 != dimensions.height {
        return Err(FramegrabError::capture_unavailable(format!(
            "GetDIBits copied {copied} of {} scanlines",
            dimensions.height
        )));
    }

    tracing::debug!(%dimensions, stride, "normalizing DIB capture");
    let rgb = bgr24_to_rgb(&native, dimensions, stride)?;
    Frame::from_rgb(dimensions, rgb)
}

/// The screen's device context, released on drop.
struct ScreenDc(HDC);

impl ScreenDc {
    fn acquire() -> FramegrabResult<Self> {
        let hdc = unsafe { GetDC(HWND::default()) };
        if hdc.is_invalid() {
            return Err(FramegrabError::resource_acquisition(
                "GetDC returned a null screen device context",
            ));
        }
        Ok(Self(hdc))
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(HWND::default(), self.0);
        }
    }
}

/// A memory device context, deleted on drop.
struct MemoryDc(HDC);

impl MemoryDc {
    fn compatible_with(screen: &ScreenDc) -> FramegrabResult<Self> {
        let hdc = unsafe { CreateCompatibleDC(screen.0) };
        if hdc.is_invalid() {
            return Err(FramegrabError::resource_acquisition(
                "CreateCompatibleDC failed for the screen device context",
            ));
        }
        Ok(Self(hdc))
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteDC(self.0);
        }
    }
}

/// A GDI bitmap, deleted on drop.
struct CompatibleBitmap(HBITMAP);

impl CompatibleBitmap {
    fn create(screen: &ScreenDc, width: i32, height: i32) -> FramegrabResult<Self> {
        let hbitmap = unsafe { CreateCompatibleBitmap(screen.0, width, height) };
        if hbitmap.is_invalid() {
            return Err(FramegrabError::resource_acquisition(format!(
                "CreateCompatibleBitmap failed for {width}x{height}"
            )));
        }
        Ok(Self(hbitmap))
    }
}

impl Drop for CompatibleBitmap {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(HGDIOBJ(self.0 .0));
        }
    }
}

/// Keeps the capture bitmap selected into the memory DC and restores the
/// previous object on drop, so the bitmap is deletable afterwards.
struct SelectedBitmap {
    dc: HDC,
    previous: HGDIOBJ,
}

impl SelectedBitmap {
    fn select(memory: &MemoryDc, bitmap: &CompatibleBitmap) -> FramegrabResult<Self> {
        let previous = unsafe { SelectObject(memory.0, HGDIOBJ(bitmap.0 .0)) };
        if previous.is_invalid() {
            return Err(FramegrabError::resource_acquisition(
                "SelectObject failed to select the capture bitmap",
            ));
        }
        Ok(Self {
            dc: memory.0,
            previous,
        })
    }
}

impl Drop for SelectedBitmap {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc, self.previous);
        }
    }
}
