//! Build command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::build::{BuildContext, BuildError, BuildPipeline};
use crate::config::{merge_cli_overrides, CliOverrides};

use super::{load_project, EXIT_ERROR, EXIT_SUCCESS};

/// Run the build command
pub fn run_build(
    config: Option<&Path>,
    src: Option<&Path>,
    out: Option<&Path>,
    dry_run: bool,
) -> ExitCode {
    let (mut config, project_root) = match load_project(config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let overrides = CliOverrides {
        src: src.map(|p| p.to_path_buf()),
        out: out.map(|p| p.to_path_buf()),
        ..Default::default()
    };
    merge_cli_overrides(&mut config, &overrides);

    let context = BuildContext::new(config, project_root);
    let pipeline = BuildPipeline::new(context).with_dry_run(dry_run);

    match pipeline.build() {
        Ok(result) => {
            for asset in &result.assets {
                println!("  {}", asset);
            }
            match result.output {
                Some(ref path) => println!("Wrote {}", path.display()),
                None => println!("Dry run - nothing written"),
            }
            println!("{}", result.summary());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, BuildError::MissingAssetDir(_)) {
                eprintln!("Create the directory or specify a different path with --src");
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}
