//! Windows shell access through `shell32`, `comctl32` and GDI.
//!
//! Every OS handle acquired here is wrapped in a guard that releases it on
//! drop, so early returns on failure never leak icons, bitmaps or DCs.

use std::ffi::{OsStr, c_void};
use std::mem::{size_of, zeroed};
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr::null_mut;

use windows_sys::Win32::Graphics::Gdi::{
    BI_RGB, BITMAP, BITMAPINFO, BITMAPINFOHEADER, DIB_RGB_COLORS, DeleteObject, GetDC, GetDIBits,
    GetObjectW, HBITMAP, HDC, ReleaseDC,
};
use windows_sys::Win32::UI::Controls::{ILD_NORMAL, ImageList_GetIcon};
use windows_sys::Win32::UI::Shell::{
    SHELLEXECUTEINFOW, SHFILEINFOW, SHGFI_SMALLICON, SHGFI_SYSICONINDEX, SHGetFileInfoW,
    ShellExecuteExW,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    DestroyIcon, GetIconInfo, HICON, ICONINFO, SW_SHOWNORMAL,
};

use crate::IconImage;

/// Icon handle owned by us; destroyed on drop.
struct OwnedIcon(HICON);

impl OwnedIcon {
    fn new(handle: HICON) -> Option<Self> {
        (!handle.is_null()).then_some(Self(handle))
    }
}

impl Drop for OwnedIcon {
    fn drop(&mut self) {
        // SAFETY: the handle came from ImageList_GetIcon and is owned solely by us.
        unsafe { DestroyIcon(self.0) };
    }
}

/// GDI bitmap returned by `GetIconInfo`; the caller must delete it.
struct OwnedBitmap(HBITMAP);

impl Drop for OwnedBitmap {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: GetIconInfo hands ownership of both bitmaps to the caller.
            unsafe { DeleteObject(self.0) };
        }
    }
}

/// Screen device context, released on drop.
struct ScreenDc(HDC);

impl ScreenDc {
    fn acquire() -> Option<Self> {
        // SAFETY: a null window handle requests the DC of the whole screen.
        let dc = unsafe { GetDC(null_mut()) };
        (!dc.is_null()).then_some(Self(dc))
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        // SAFETY: the DC was obtained from GetDC(NULL) above.
        unsafe { ReleaseDC(null_mut(), self.0) };
    }
}

fn wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

/// Returns the small shell icon for `path`, without the shortcut overlay.
///
/// Goes through the system image list rather than `SHGFI_ICON`, which would
/// paint the link arrow on `.lnk` files.
pub(crate) fn small_icon(path: &Path) -> Option<IconImage> {
    let path_w = wide(path.as_os_str());
    // SAFETY: SHFILEINFOW is plain data; all-zero is a valid initial state.
    let mut info: SHFILEINFOW = unsafe { zeroed() };

    // SAFETY: path_w is NUL-terminated and outlives the call; info is a valid out-pointer.
    let list = unsafe {
        SHGetFileInfoW(
            path_w.as_ptr(),
            0,
            &mut info,
            size_of::<SHFILEINFOW>() as u32,
            SHGFI_SYSICONINDEX | SHGFI_SMALLICON,
        )
    };
    if list == 0 {
        tracing::debug!(path = %path.display(), "no system image list entry");
        return None;
    }

    // SAFETY: with SHGFI_SYSICONINDEX the return value is the image list handle.
    let handle = unsafe { ImageList_GetIcon(list as _, info.iIcon, ILD_NORMAL) };
    let icon = OwnedIcon::new(handle)?;

    let image = icon_pixels(&icon);
    if image.is_none() {
        tracing::debug!(path = %path.display(), "failed to read icon pixels");
    }
    image
}

fn icon_pixels(icon: &OwnedIcon) -> Option<IconImage> {
    // SAFETY: ICONINFO is plain data.
    let mut info: ICONINFO = unsafe { zeroed() };
    // SAFETY: icon.0 is a live icon handle.
    if unsafe { GetIconInfo(icon.0, &mut info) } == 0 {
        return None;
    }
    let color = OwnedBitmap(info.hbmColor);
    let _mask = OwnedBitmap(info.hbmMask);

    // Monochrome icons have no color bitmap.
    if color.0.is_null() {
        return None;
    }

    // SAFETY: BITMAP is plain data.
    let mut bitmap: BITMAP = unsafe { zeroed() };
    // SAFETY: bitmap is a correctly sized out-buffer for a BITMAP.
    let read = unsafe {
        GetObjectW(
            color.0,
            size_of::<BITMAP>() as i32,
            &mut bitmap as *mut BITMAP as *mut c_void,
        )
    };
    if read == 0 || bitmap.bmWidth <= 0 || bitmap.bmHeight <= 0 {
        return None;
    }
    let (width, height) = (bitmap.bmWidth, bitmap.bmHeight);

    let dc = ScreenDc::acquire()?;

    // SAFETY: BITMAPINFO is plain data.
    let mut header: BITMAPINFO = unsafe { zeroed() };
    header.bmiHeader.biSize = size_of::<BITMAPINFOHEADER>() as u32;
    header.bmiHeader.biWidth = width;
    // Negative height asks for top-down rows.
    header.bmiHeader.biHeight = -height;
    header.bmiHeader.biPlanes = 1;
    header.bmiHeader.biBitCount = 32;
    header.bmiHeader.biCompression = BI_RGB;

    let mut pixels = vec![0u8; width as usize * height as usize * 4];
    // SAFETY: pixels holds exactly width * height 32-bit pixels as described by header.
    let lines = unsafe {
        GetDIBits(
            dc.0,
            color.0,
            0,
            height as u32,
            pixels.as_mut_ptr().cast(),
            &mut header,
            DIB_RGB_COLORS,
        )
    };
    if lines == 0 {
        return None;
    }

    IconImage::from_bgra(pixels, width as u32, height as u32)
}

/// Runs the shell "open" verb on `path`.
///
/// The shell shows its own error dialog when no handler exists or the target
/// is gone; the failure is still reported to the caller.
pub(crate) fn shell_open(path: &Path) -> std::io::Result<()> {
    let verb = wide(OsStr::new("open"));
    let file = wide(path.as_os_str());

    // SAFETY: SHELLEXECUTEINFOW is plain data; zero means "no optional fields".
    let mut info: SHELLEXECUTEINFOW = unsafe { zeroed() };
    info.cbSize = size_of::<SHELLEXECUTEINFOW>() as u32;
    info.lpVerb = verb.as_ptr();
    info.lpFile = file.as_ptr();
    info.nShow = SW_SHOWNORMAL;

    // SAFETY: verb and file are NUL-terminated and outlive the call.
    if unsafe { ShellExecuteExW(&mut info) } == 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}
