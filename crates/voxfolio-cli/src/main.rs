use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use voxfolio_cli::manifest::{self, ModelManifest};
use voxfolio_cli::report::{self, RunSummary};
use voxfolio_core::types::Voxel;
use voxfolio_mesh::prepare::prepare_surfaces;
use voxfolio_mesh::scene::SceneNode;
use voxfolio_mesh::stl::load_stl_file;
use voxfolio_persist::format::Metadata;
use voxfolio_render::instanced::InstancedVoxels;
use voxfolio_voxelize::{voxelize, voxelize_prepared, VoxelizeOutcome};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut manifest_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut load_path: Option<PathBuf> = None;
    let mut compress = false;
    let mut meshes: Vec<PathBuf> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--manifest" => {
                i += 1;
                manifest_path = Some(PathBuf::from(flag_value(&args, i, "--manifest")));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(flag_value(&args, i, "--output")));
            }
            "--load" => {
                i += 1;
                load_path = Some(PathBuf::from(flag_value(&args, i, "--load")));
            }
            "--compress" => compress = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
            mesh => meshes.push(PathBuf::from(mesh)),
        }
        i += 1;
    }

    let result = match (load_path, manifest_path) {
        (Some(path), _) => reload(&path),
        (None, Some(manifest)) if !meshes.is_empty() => {
            run(&manifest, &meshes, output_path.as_deref(), compress)
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("ERROR: {e}");
        process::exit(1);
    }
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: voxelize --manifest <model.ron> [OPTIONS] <mesh.stl>...");
    eprintln!("       voxelize --load <voxels.json|voxels.vxl>");
    eprintln!("  --manifest <path>   RON manifest with metadata, params and materials");
    eprintln!("  --output <path>     Write the voxel file here");
    eprintln!("  --compress          Write the LZ4 container instead of plain JSON");
    eprintln!("  --load <path>       Reload a voxel file and rebuild its instances");
}

/// Sample the meshes named on the command line and optionally save the result.
fn run(manifest_path: &Path, meshes: &[PathBuf], output: Option<&Path>, compress: bool) -> CliResult<()> {
    let manifest = manifest::load_manifest(manifest_path)?;
    log::info!("Loaded manifest '{}' from {}", manifest.metadata.name, manifest_path.display());

    let scene = load_scene(&manifest, meshes)?;
    let start = Instant::now();
    let outcome = if manifest.normalize {
        voxelize(scene, &manifest.params)?
    } else {
        voxelize_prepared(&prepare_surfaces(scene), &manifest.params)?
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let voxelization = match outcome {
        VoxelizeOutcome::Voxelized(v) => v,
        VoxelizeOutcome::Empty(reason) => {
            return Err(format!("nothing to voxelize ({reason:?})").into());
        }
    };

    let mut summary = RunSummary::from_voxels(&manifest.metadata.name, &voxelization.voxels, elapsed_ms);
    summary.dimensions = Some(voxelization.dimensions);
    println!("\n## Voxelization\n");
    println!("{}", report::format_markdown(&summary));

    if let Some(path) = output {
        let mut metadata = manifest.metadata.clone();
        if metadata.mesh_path.is_empty() {
            metadata.mesh_path = meshes[0].display().to_string();
        }
        write_output(path, &metadata, &manifest, &voxelization.voxels, compress)?;
    }
    Ok(())
}

/// One child node per mesh, each with its manifest material.
fn load_scene(manifest: &ModelManifest, meshes: &[PathBuf]) -> CliResult<SceneNode> {
    let mut scene = SceneNode::group(&manifest.metadata.name);
    for (index, path) in meshes.iter().enumerate() {
        let material = manifest.material_for(index)?;
        let node = load_stl_file(path, material)?;
        log::info!("Loaded mesh {}", path.display());
        scene = scene.with_child(node);
    }
    Ok(scene)
}

fn write_output(
    path: &Path,
    metadata: &Metadata,
    manifest: &ModelManifest,
    voxels: &[Voxel],
    compress: bool,
) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = if compress {
        voxfolio_persist::save_compressed(metadata, &manifest.params, voxels)?
    } else {
        voxfolio_persist::save_json(metadata, &manifest.params, voxels)?.into_bytes()
    };
    std::fs::write(path, &bytes)?;
    log::info!("Saved {} voxels to {} ({} bytes)", voxels.len(), path.display(), bytes.len());
    Ok(())
}

/// Rebuild the instanced object from a saved file without re-sampling.
fn reload(path: &Path) -> CliResult<()> {
    let start = Instant::now();
    let bytes = std::fs::read(path)?;
    let loaded = voxfolio_persist::load(&bytes)?;
    let mut instances = InstancedVoxels::from_voxels(&loaded.params, &loaded.voxels);
    let upload = instances.instance_data();
    instances.mark_uploaded();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    log::info!(
        "Rebuilt {} instances ({} bytes of instance data)",
        instances.count(),
        std::mem::size_of_val(upload.as_slice())
    );
    for warning in &loaded.warnings {
        println!("warning: {warning}");
    }
    let summary = RunSummary::from_voxels(&loaded.metadata.name, &loaded.voxels, elapsed_ms);
    println!("\n## Reload\n");
    println!("{}", report::format_markdown(&summary));
    Ok(())
}
