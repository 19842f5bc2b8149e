//! Assertion helpers for tests.

use std::path::Path;

use palette_quant::{validate_palette, Palette, Raster};
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert bytes are a PNG and decode them
pub fn assert_png(bytes: &[u8]) -> Raster {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    pixelize::image_io::decode_raster(bytes).expect("decode written PNG")
}

/// Assert a PNG file exists with the given dimensions and return its pixels
pub fn assert_png_file(path: &Path, width: u32, height: u32) -> Raster {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected {} to exist: {e}", path.display()));
    let raster = assert_png(&bytes);
    assert_eq!(
        raster.dimensions(),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
    raster
}

/// Assert every opaque pixel is a palette color
pub fn assert_in_palette(raster: &Raster, palette: &Palette) {
    let check = validate_palette(raster, palette);
    assert!(
        check.is_clean(),
        "Expected all pixels in palette, found {} off-palette pixels ({:?})",
        check.off_palette,
        check.unexpected
    );
}

/// Assert each `block`x`block` cell of `big` is one flat copy of `small`'s pixel
pub fn assert_blocks_match(big: &Raster, small: &Raster, block: u32) {
    assert_eq!(
        big.dimensions(),
        (small.width() * block, small.height() * block)
    );
    for y in 0..big.height() {
        for x in 0..big.width() {
            assert_eq!(
                big.pixel(x, y),
                small.pixel(x / block, y / block),
                "Pixel ({x}, {y}) differs from its source cell"
            );
        }
    }
}
