//! Owned icon pixels, detached from any OS handle.

/// An icon image as straight RGBA8 pixels, row-major, top-down.
#[derive(Clone, PartialEq, Eq)]
pub struct IconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for IconImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl IconImage {
    /// Converts 32-bit BGRA pixels (the layout `GetDIBits` produces) to RGBA.
    ///
    /// Legacy icons carry no alpha channel at all; when every alpha byte is
    /// zero the image is treated as fully opaque instead of invisible.
    /// Returns `None` if the buffer does not match the dimensions.
    pub fn from_bgra(mut pixels: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }

        let has_alpha = pixels.chunks_exact(4).any(|px| px[3] != 0);
        for px in pixels.chunks_exact_mut(4) {
            px.swap(0, 2);
            if !has_alpha {
                px[3] = 0xFF;
            }
        }

        Some(Self {
            rgba: pixels,
            width,
            height,
        })
    }
}
