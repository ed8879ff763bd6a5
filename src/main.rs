/*

    Build bounding cages for the objects of a scene file
    and report the bottom face polygon of each one.

    Usage: cage-frame <scene>.json
           cage-frame <folder>     (every .json below it)

    @date: Oct, 2025

*/

use std::{env, path::{Path, PathBuf}};
use tracing::{info, warn, error, debug};
use walkdir::WalkDir;

use cage_frame::json_parser::parse_scene_json;
use cage_frame::json_structs::LoadedScene;

fn collect_scene_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
        .collect();
    files.sort();
    files
}

fn report(loaded: &LoadedScene) -> Result<(), Box<dyn std::error::Error>> {
    for obj in loaded.objects.iter() {
        let Some(cage) = obj.cage() else { continue };

        let corners = cage.world_corners(&loaded.scene)?;
        debug!("Corners of '{}': {:?}", obj.definition.model_name, corners);

        let polygon = cage.polygon(&loaded.scene)?;
        info!(
            "'{}': bounds {}, bottom face {:?} with area {:.4}",
            obj.definition.model_name,
            cage.bounding_box(),
            polygon.winding(),
            polygon.signed_area_xz().abs(),
        );
        for (i, line) in polygon.lines().iter().enumerate() {
            info!("    line {}: {} -> {}", i + 1, line.start, line.end);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init();

    // Parse args
    let args: Vec<String> = env::args().collect();
    let input: PathBuf = if args.len() == 1 {
        warn!("No arguments were provided, setting default scene path...");
        PathBuf::from("./inputs/scene.json")
    } else if args.len() == 2 {
        PathBuf::from(&args[1])
    } else {
        error!("Usage: {} <filename>.json | <folder>", args[0]);
        std::process::exit(1);
    };

    let files = collect_scene_files(&input);
    if files.is_empty() {
        error!("No scene files found at {}", input.display());
        std::process::exit(1);
    }

    let mut failures = 0;
    for path in files.iter() {
        info!("Loading scene from {}...", path.display());
        let scene_json = match parse_scene_json(path) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to load scene: {}", e);
                failures += 1;
                continue;
            }
        };

        let loaded = scene_json.setup();
        failures += loaded.failed.len();
        report(&loaded)?;
    }

    if failures > 0 {
        warn!("Finished with {} failure(s).", failures);
    } else {
        info!("Finished execution.");
    }
    Ok(())
}
