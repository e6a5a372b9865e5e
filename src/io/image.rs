//! PNG export of the board as currently arranged

use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::puzzle::tiles::TileSet;
use image::{DynamicImage, GenericImageView, RgbaImage, imageops};
use std::path::{Path, PathBuf};

/// Compose the board from the source image
///
/// Each slot shows the region of `source` that its occupying tile samples, so
/// a solved board reproduces the (cropped) source image. The output is the
/// largest size evenly divisible into `dim` x `dim` tiles.
///
/// # Errors
///
/// Returns an error if the tile set is empty or the image is smaller than the grid
pub fn render_board(tiles: &TileSet, source: &DynamicImage) -> Result<RgbaImage> {
    let dim = tiles.dim();
    let (width, height) = source.dimensions();
    let dim_u32 = u32::try_from(dim).unwrap_or(u32::MAX);
    if tiles.is_empty() || width < dim_u32 || height < dim_u32 {
        return Err(invalid_parameter(
            "source image",
            &format!("{width}x{height}"),
            &format!("cannot cut a {dim}x{dim} board from it"),
        ));
    }

    let tile_width = width / dim_u32;
    let tile_height = height / dim_u32;
    let mut board = RgbaImage::new(tile_width * dim_u32, tile_height * dim_u32);

    for slot in 0..tiles.len() {
        let Some(tile) = tiles.tile_at(slot) else {
            continue;
        };
        let (src_x, src_y) = tile
            .source_region()
            .pixel_origin(width, height, tile_width, tile_height);
        let piece = source
            .crop_imm(src_x, src_y, tile_width, tile_height)
            .to_rgba8();

        let col = (slot % dim) as u32;
        let row = (slot / dim) as u32;
        imageops::replace(
            &mut board,
            &piece,
            i64::from(col * tile_width),
            i64::from(row * tile_height),
        );
    }

    Ok(board)
}

/// Render the board from its source image file and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The tile set has no source image
/// - The source image cannot be loaded
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_board_as_png(tiles: &TileSet, output_path: &Path) -> Result<()> {
    let handle = tiles
        .image()
        .ok_or_else(|| invalid_parameter("tiles", &"empty", &"no source image to render"))?;
    let source_path = PathBuf::from(handle.as_str());
    let source = image::open(&source_path).map_err(|e| PuzzleError::ImageLoad {
        path: source_path,
        source: e,
    })?;

    let board = render_board(tiles, &source)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    board
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| PuzzleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
