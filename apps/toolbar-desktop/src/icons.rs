//! Tray images.
//!
//! Icons come from the shell as RGBA pixels. When the shell has nothing to
//! offer, a plain folder glyph is drawn instead.

#![cfg_attr(not(windows), allow(dead_code))]

use systray_toolbar_shell::IconImage;

/// Edge length of the drawn fallback icon.
pub const FALLBACK_SIZE: u32 = 32;

const FOLDER_BODY: [u8; 4] = [0xF2, 0xC2, 0x4F, 0xFF];
const FOLDER_TAB: [u8; 4] = [0xD9, 0xA4, 0x2E, 0xFF];
const FOLDER_EDGE: [u8; 4] = [0xA8, 0x7A, 0x1C, 0xFF];

/// RGBA pixels and size for a tray image, falling back to the folder glyph.
pub fn tray_rgba(icon: Option<&IconImage>) -> (Vec<u8>, u32, u32) {
    match icon {
        Some(image) => (image.rgba.clone(), image.width, image.height),
        None => (folder_rgba(FALLBACK_SIZE), FALLBACK_SIZE, FALLBACK_SIZE),
    }
}

/// Draws a `size`×`size` folder: a tab on the upper left over a wide body.
pub fn folder_rgba(size: u32) -> Vec<u8> {
    let mut rgba = vec![0u8; (size * size * 4) as usize];

    let tab_top = size * 3 / 16;
    let body_top = size * 5 / 16;
    let bottom = size - size / 8;
    let left = size / 16;
    let right = size - size / 16;
    let tab_right = size / 2;

    for y in 0..size {
        for x in 0..size {
            let inside_body = y >= body_top && y < bottom && x >= left && x < right;
            let inside_tab = y >= tab_top && y < body_top && x >= left && x < tab_right;

            let color = if inside_body {
                let edge = y == body_top || y + 1 == bottom || x == left || x + 1 == right;
                if edge { FOLDER_EDGE } else { FOLDER_BODY }
            } else if inside_tab {
                FOLDER_TAB
            } else {
                continue;
            };

            let offset = ((y * size + x) * 4) as usize;
            rgba[offset..offset + 4].copy_from_slice(&color);
        }
    }

    rgba
}
