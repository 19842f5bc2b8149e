//! Reading source images and writing PNG output.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use palette_quant::Raster;

use crate::error::{InputError, OutputError};

/// Largest accepted input file.
pub const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted input extensions, lower case.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Check type and size of an input file before decoding it.
pub fn validate_input_file(path: &Path) -> Result<u64, InputError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(InputError::UnsupportedType(if ext.is_empty() {
            "(none)".to_string()
        } else {
            ext
        }));
    }

    let size = std::fs::metadata(path)
        .map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > MAX_INPUT_BYTES {
        return Err(InputError::TooLarge {
            size,
            max: MAX_INPUT_BYTES,
        });
    }
    Ok(size)
}

/// Validate and decode an image file to RGBA8.
pub fn load_raster(path: &Path) -> Result<Raster, InputError> {
    let size = validate_input_file(path)?;
    let bytes = std::fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raster = decode_raster(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        bytes = size,
        width = raster.width(),
        height = raster.height(),
        "Decoded input image"
    );
    Ok(raster)
}

/// Decode an in-memory image (format sniffed from its header) to RGBA8.
pub fn decode_raster(bytes: &[u8]) -> Result<Raster, InputError> {
    let image = image::load_from_memory(bytes).map_err(|e| InputError::Decode(e.to_string()))?;
    Ok(Raster::from_rgba_image(image.to_rgba8())?)
}

/// Encode a raster as PNG.
///
/// Rasters with at most 256 distinct RGBA values (every quantized
/// output, most grid-free exports) are written as indexed PNG at the
/// smallest bit depth that fits, with a tRNS chunk when any entry is not
/// opaque. Anything else is written as 8-bit RGBA.
pub fn encode_png(raster: &Raster, optimize: bool) -> Result<Vec<u8>, OutputError> {
    if raster.is_empty() {
        return Err(OutputError::Empty {
            width: raster.width(),
            height: raster.height(),
        });
    }

    let png_bytes = match index_colors(raster) {
        Some((entries, indices)) => {
            let (depth, bits) = match entries.len() {
                0..=2 => (png::BitDepth::One, 1),
                3..=4 => (png::BitDepth::Two, 2),
                5..=16 => (png::BitDepth::Four, 4),
                _ => (png::BitDepth::Eight, 8),
            };
            let plte: Vec<u8> = entries.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
            let trns: Option<Vec<u8>> = entries
                .iter()
                .any(|c| c[3] != 255)
                .then(|| entries.iter().map(|c| c[3]).collect());
            let packed = if bits == 8 {
                indices
            } else {
                pack_nbits(&indices, raster.width(), bits)
            };
            write_png(
                raster,
                png::ColorType::Indexed,
                depth,
                Some(&plte),
                trns.as_deref(),
                &packed,
            )?
        }
        None => write_png(
            raster,
            png::ColorType::Rgba,
            png::BitDepth::Eight,
            None,
            None,
            raster.as_raw(),
        )?,
    };

    if !optimize {
        return Ok(png_bytes);
    }

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

/// Encode `raster` and write it to `path`.
pub fn save_png(path: &Path, raster: &Raster, optimize: bool) -> Result<usize, OutputError> {
    let bytes = encode_png(raster, optimize)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        width = raster.width(),
        height = raster.height(),
        "Wrote PNG"
    );
    Ok(bytes.len())
}

/// Output file names derived from the input's stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// The 1:1 pixel art
    pub pixel_art: PathBuf,
    /// The upscaled on-screen render
    pub preview: PathBuf,
    /// The high-resolution export
    pub high_res: PathBuf,
}

impl OutputPaths {
    /// `<stem>-pixel-art.png` and friends, placed in `dir`.
    pub fn new(input: &Path, dir: &Path) -> Self {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("image");
        Self {
            pixel_art: dir.join(format!("{stem}-pixel-art.png")),
            preview: dir.join(format!("{stem}-pixel-art-preview.png")),
            high_res: dir.join(format!("{stem}-pixel-art-highres.png")),
        }
    }
}

/// Palette entries and per-pixel indices, if at most 256 colors occur.
fn index_colors(raster: &Raster) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::new();
    let mut entries = Vec::new();
    let mut indices = Vec::with_capacity(raster.pixel_count());

    for px in raster.pixels() {
        let idx = match lookup.get(&px) {
            Some(&idx) => idx,
            None => {
                let idx = u8::try_from(entries.len()).ok()?;
                lookup.insert(px, idx);
                entries.push(px);
                idx
            }
        };
        indices.push(idx);
    }
    Some((entries, indices))
}

fn write_png(
    raster: &Raster,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    trns: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, OutputError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, raster.width(), raster.height());
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| OutputError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| OutputError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;
            if i % pixels_per_byte == pixels_per_byte - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
        if row.len() % pixels_per_byte != 0 {
            packed.push(byte);
        }
    }

    packed
}
