//! Test fixtures: sample rasters and temporary input files.

use std::path::{Path, PathBuf};

use palette_quant::Raster;
use tempfile::TempDir;

/// Sample palettes as raw hex lists
pub mod palettes {
    /// Black and white only
    pub const MONO: [&str; 2] = ["#000000", "#FFFFFF"];

    /// A small custom set with one bad entry and one duplicate
    pub const MESSY: [&str; 5] = ["#000000", "nope", "#ff4500", "#FF4500", "#FFFFFF"];
}

/// Horizontal gradient from black to white with a blue tint in the lower half
pub fn gradient(width: u32, height: u32) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        let v = (x * 255 / width.saturating_sub(1).max(1)) as u8;
        if y < height / 2 {
            [v, v, v, 255]
        } else {
            [v / 2, v / 2, v, 255]
        }
    })
    .expect("gradient fixture")
}

/// Opaque square with a fully transparent border `border` pixels wide
pub fn framed(size: u32, border: u32) -> Raster {
    Raster::from_fn(size, size, |x, y| {
        let inside = x >= border && y >= border && x < size - border && y < size - border;
        if inside {
            [200, 40, 40, 255]
        } else {
            [0, 0, 0, 0]
        }
    })
    .expect("framed fixture")
}

/// Encode a raster as an RGBA PNG in memory.
pub fn png_bytes(raster: &Raster) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    raster
        .to_rgba_image()
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode fixture");
    out.into_inner()
}

/// A temporary directory holding input images and receiving outputs.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `raster` as `<name>` and return its path.
    pub fn write_png(&self, name: &str, raster: &Raster) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, png_bytes(raster)).expect("write fixture");
        path
    }

    /// Write raw bytes as `<name>` and return its path.
    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).expect("write fixture");
        path
    }

    /// Write a config.yaml and return its path.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        self.write_bytes("config.yaml", yaml.as_bytes())
    }
}
