//! End-to-end flow tests: load an image file, convert it and write outputs.

mod common;

use common::{fixtures, fixtures::palettes, Workspace};
use palette_quant::{ColorSelection, Palette, PalettePreset, Session, TRANSPARENT_WHITE};
use pixelize::config::AppConfig;
use pixelize::error::InputError;
use pixelize::image_io::{load_raster, save_png, OutputPaths};

#[test]
fn test_complete_conversion_flow() {
    let ws = Workspace::new();
    let input = ws.write_png("photo.png", &fixtures::gradient(120, 80));

    // Step 1: Load with default settings
    let config = AppConfig::default();
    let palette = config.color_selection().resolve().palette;
    let converter = config.converter(palette.clone());

    let mut session = Session::new();
    session.load(load_raster(&input).unwrap());

    // Step 2: Convert
    let result = session.convert_with(&converter, 32).unwrap();
    assert_eq!((result.width, result.height), (32, 21));
    assert_eq!(result.total_pixels, 32 * 21);
    assert!(result.is_within_palette());

    // Step 3: Write and reload the 1:1 pixel art
    let paths = OutputPaths::new(&input, ws.path());
    let standard = session.render_standard(false).unwrap();
    let bytes = save_png(&paths.pixel_art, &standard, true).unwrap();
    assert!(bytes > 0);

    let reloaded = common::assert_png_file(&paths.pixel_art, 32, 21);
    assert_eq!(reloaded, standard);
    common::assert_in_palette(&reloaded, &palette);
}

#[test]
fn test_high_res_export_round_trips_through_png() {
    let ws = Workspace::new();
    let input = ws.write_png("badge.png", &fixtures::framed(64, 16));

    let mut session = Session::new();
    session.load(load_raster(&input).unwrap());
    session
        .convert(16, &PalettePreset::Free.palette(), Default::default())
        .unwrap();
    let small = session.last_result().unwrap().raster.clone();

    let export = session.render_high_res(10, false).unwrap();
    common::assert_blocks_match(&export, &small, 10);

    let paths = OutputPaths::new(&input, ws.path());
    save_png(&paths.high_res, &export, false).unwrap();
    let reloaded = common::assert_png_file(&paths.high_res, 160, 160);
    assert_eq!(reloaded, export);
}

#[test]
fn test_transparent_border_survives_conversion() {
    let ws = Workspace::new();
    let input = ws.write_png("framed.png", &fixtures::framed(64, 16));

    let mut session = Session::new();
    session.load(load_raster(&input).unwrap());
    let result = session
        .convert(16, &PalettePreset::Free.palette(), Default::default())
        .unwrap();

    // The outer ring of logical pixels maps onto fully transparent source
    for (x, y) in [(0, 0), (15, 0), (0, 15), (15, 15), (1, 7), (7, 1)] {
        assert_eq!(result.raster.pixel(x, y), TRANSPARENT_WHITE, "({x}, {y})");
    }
    // The centre is opaque and inside the palette
    assert_eq!(result.raster.pixel(8, 8)[3], 255);
    assert!(result.is_within_palette());
}

#[test]
fn test_grid_export_keeps_size_and_marks_lines() {
    let ws = Workspace::new();
    let input = ws.write_png("grid.png", &fixtures::gradient(40, 40));

    let mut session = Session::new();
    session.load(load_raster(&input).unwrap());
    session
        .convert(8, &PalettePreset::Free.palette(), Default::default())
        .unwrap();

    let plain = session.render_high_res(30, false).unwrap();
    let gridded = session.render_high_res(30, true).unwrap();
    assert_eq!(gridded.dimensions(), plain.dimensions());

    // Cell interiors are untouched, the boundary between cells is not
    assert_eq!(gridded.pixel(15, 15), plain.pixel(15, 15));
    assert!((0..gridded.height()).any(|y| gridded.pixel(30, y) != plain.pixel(30, y)));
}

#[test]
fn test_preview_render_written() {
    let ws = Workspace::new();
    let input = ws.write_png("preview.png", &fixtures::gradient(96, 48));

    let mut session = Session::new();
    session.load(load_raster(&input).unwrap());
    session
        .convert(32, &PalettePreset::Free.palette(), Default::default())
        .unwrap();

    let display = session.render_display(true).unwrap();
    assert_eq!(display.block_size, 12);
    assert_eq!(display.raster.dimensions(), (32 * 12, 16 * 12));

    let paths = OutputPaths::new(&input, ws.path());
    save_png(&paths.preview, &display.raster, true).unwrap();
    common::assert_png_file(&paths.preview, 384, 192);
}

#[test]
fn test_config_file_drives_conversion() {
    let ws = Workspace::new();
    let config_path = ws.write_config(
        r##"
target_width: 16
mode: direct
palette: custom
custom_colors:
  - "#000000"
  - "#FFFFFF"
"##,
    );
    let input = ws.write_png("config.png", &fixtures::gradient(64, 32));

    let config = AppConfig::load(Some(&config_path));
    let build = config.color_selection().resolve();
    assert!(build.rejected.is_empty());
    let palette = build.palette;
    assert_eq!(palette, Palette::from_hex(&palettes::MONO).unwrap());

    let result = config
        .converter(palette.clone())
        .convert(&load_raster(&input).unwrap(), config.target_width())
        .unwrap();
    assert_eq!(result.raster.dimensions(), (16, 8));
    common::assert_in_palette(&result.raster, &palette);
    assert!(result.check.found.len() <= 2);
}

#[test]
fn test_messy_custom_palette_is_cleaned() {
    let build = ColorSelection::Custom(palettes::MESSY.iter().map(|s| s.to_string()).collect())
        .resolve();

    assert!(!build.used_fallback);
    assert_eq!(build.rejected.len(), 1);
    assert_eq!(build.rejected[0].index, 1);
    assert_eq!(build.rejected[0].input, "nope");
    assert_eq!(build.palette.to_hex(), vec!["#000000", "#FF4500", "#FFFFFF"]);
}

#[test]
fn test_input_validation() {
    let ws = Workspace::new();

    let text = ws.write_bytes("notes.txt", b"hello");
    assert!(matches!(
        load_raster(&text),
        Err(InputError::UnsupportedType(ext)) if ext == "txt"
    ));

    let broken = ws.write_bytes("broken.png", b"definitely not a png");
    assert!(matches!(load_raster(&broken), Err(InputError::Decode(_))));

    let missing = ws.path().join("missing.png");
    assert!(matches!(load_raster(&missing), Err(InputError::Read { .. })));
}
