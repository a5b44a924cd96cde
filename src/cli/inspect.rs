//! Artifact inspection and tile extraction commands

use std::path::Path;
use std::process::ExitCode;

use crate::assets::AssetBundle;
use crate::container::DecodedImage;
use crate::level::Level;
use crate::output::{save_png, scale_image, tile_output_path};
use crate::tilemap::TileMap;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

fn load_bundle(artifact: &Path) -> Option<AssetBundle> {
    match AssetBundle::load(artifact) {
        Ok(bundle) => Some(bundle),
        Err(e) => {
            eprintln!("Error: {}: {}", artifact.display(), e);
            None
        }
    }
}

/// Execute the inspect command
pub fn run_inspect(artifact: &Path, asset: Option<&str>) -> ExitCode {
    let Some(bundle) = load_bundle(artifact) else {
        return ExitCode::from(EXIT_ERROR);
    };

    let names: Vec<&str> = match asset {
        Some(name) => {
            if !bundle.contains(name) {
                eprintln!("Error: Asset '{}' not found in {}", name, artifact.display());
                return ExitCode::from(EXIT_ERROR);
            }
            vec![name]
        }
        None => bundle.names().collect(),
    };

    if names.is_empty() {
        println!("{}: no assets", artifact.display());
        return ExitCode::from(EXIT_SUCCESS);
    }

    let mut failed = false;
    for (name, container) in bundle.iter().filter(|(n, _)| names.contains(n)) {
        // Decoding validates the index buffer against the header.
        match DecodedImage::new(container.clone()) {
            Ok(image) => println!(
                "{}: {}x{}, {} colors, {}-byte indices",
                name,
                image.width(),
                image.height(),
                container.palette.len(),
                container.index_width.bytes()
            ),
            Err(e) => {
                eprintln!("Error: {}: {}", name, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Execute the tile command
pub fn run_tile(
    artifact: &Path,
    asset: &str,
    tile: &str,
    output: Option<&Path>,
    scale: u32,
) -> ExitCode {
    let Some(bundle) = load_bundle(artifact) else {
        return ExitCode::from(EXIT_ERROR);
    };

    let mut map = TileMap::with_assets(bundle);
    if let Err(e) = map.load(asset) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }
    Level::<()>::setup_tile_definitions(&mut map);

    if map.get_tile_definition(tile).is_none() {
        eprintln!("Error: Unknown tile '{}'", tile);
        let mut known: Vec<_> = map.definitions().map(|d| d.name.as_str()).collect();
        known.sort_unstable();
        eprintln!("Known tiles: {}", known.join(", "));
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let Some(image) = map.tile_image(tile) else {
        eprintln!("Error: Tile '{}' could not be extracted", tile);
        return ExitCode::from(EXIT_ERROR);
    };

    let path = tile_output_path(tile, output);
    match save_png(&scale_image(image, scale), &path) {
        Ok(()) => {
            println!("Saved: {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}: {}", path.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
