//! Level generation command

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::config::{load_layout, merge_cli_overrides, CliOverrides};
use crate::level::catalog::{
    BUSH, GRASS_FLAT, GRASS_FLOWERS, GRASS_STONES, GRASS_TUFTS, MUSHROOMS, TREE_BOTTOM, TREE_TOP,
};
use crate::level::{Level, TopTile};

use super::{load_project, EXIT_ERROR, EXIT_SUCCESS};

/// JSON form of a generated level
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelDump {
    width: u32,
    height: u32,
    seed: u64,
    bottom_layer: Vec<Vec<String>>,
    top_layer: Vec<TopTile>,
}

/// One-character glyph for a cell, top tile first.
pub(crate) fn glyph(bottom: &str, top: Option<&str>) -> char {
    match top {
        Some(TREE_TOP) => 'T',
        Some(TREE_BOTTOM) => '|',
        Some(BUSH) => '*',
        Some(MUSHROOMS) => 'm',
        Some(_) => '?',
        None => match bottom {
            GRASS_FLAT => '.',
            GRASS_TUFTS => ',',
            GRASS_FLOWERS => '"',
            GRASS_STONES => ':',
            name if name.starts_with("dirt") => '#',
            _ => '?',
        },
    }
}

/// Render the level as one line of glyphs per row.
pub(crate) fn render_glyphs(level: &Level) -> String {
    let mut out = String::with_capacity((level.width() as usize + 1) * level.height() as usize);
    for y in 0..level.height() as i32 {
        for x in 0..level.width() as i32 {
            if let Some(tile) = level.get_tile(x, y) {
                out.push(glyph(&tile.bottom_tile, tile.top_tile.as_deref()));
            }
        }
        out.push('\n');
    }
    out
}

/// Execute the level command
pub fn run_level(config: Option<&Path>, seed: Option<u64>, json: bool) -> ExitCode {
    let (mut config, project_root) = match load_project(config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    merge_cli_overrides(&mut config, &CliOverrides { seed, ..Default::default() });

    let layout = match load_layout(&config.level, &project_root) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error loading level layout: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let level = Level::generate(&layout, config.level.seed);

    if json {
        let dump = LevelDump {
            width: level.width(),
            height: level.height(),
            seed: config.level.seed,
            bottom_layer: level.get_bottom_layer_tiles(),
            top_layer: level.get_top_layer_tiles(),
        };
        match serde_json::to_string_pretty(&dump) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", render_glyphs(&level));
    }

    ExitCode::from(EXIT_SUCCESS)
}
