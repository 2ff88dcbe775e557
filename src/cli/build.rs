//! Build command implementation.
//!
//! Converts images into brick mosaics: a PNG preview and a parts list
//! per input image.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::error::{BrickError, Result};
use crate::manifest::{Manifest, MANIFEST_FILENAME};
use crate::mosaic::TilePacker;
use crate::output::{display_path, plural, Printer};
use crate::quantize::{quantize_image, ColourMetric, DitherMethod, QuantizeOptions};
use crate::render::{render_panel, write_png, MAX_SCALE};
use crate::report::BillOfMaterials;
use crate::types::{BuiltinCatalogs, Catalog, Grid};
use crate::validation::{print_diagnostics, validate_catalog};

/// File extensions picked up when an input is a directory.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Convert images into brick mosaics
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Image files or directories to convert
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Mosaic width in cells
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Builtin catalog name (basic, advanced, all) or catalog file path
    #[arg(long)]
    pub catalog: Option<String>,

    /// Dithering method
    #[arg(long, value_enum)]
    pub dither: Option<DitherMethod>,

    /// Colour distance metric
    #[arg(long, value_enum)]
    pub metric: Option<ColourMetric>,

    /// Pixels per cell in the preview image
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
    pub scale: Option<u32>,

    /// Draw pieces without outlines
    #[arg(long)]
    pub no_outline: bool,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Manifest with default settings
    #[arg(long, default_value = MANIFEST_FILENAME)]
    pub manifest: PathBuf,
}

/// Effective settings after layering flags over the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSettings {
    pub width: u32,
    pub catalog: String,
    pub quantize: QuantizeOptions,
    pub scale: u32,
    pub outline: bool,
    pub output: PathBuf,
}

impl BuildSettings {
    pub fn resolve(args: &BuildArgs, manifest: Manifest) -> Self {
        Self {
            width: args.width.unwrap_or(manifest.width),
            catalog: match &args.catalog {
                Some(catalog) => catalog.clone(),
                None => relative_to_manifest(&args.manifest, manifest.catalog),
            },
            quantize: QuantizeOptions {
                dither: args.dither.unwrap_or(manifest.dither),
                metric: args.metric.unwrap_or(manifest.metric),
            },
            scale: args.scale.unwrap_or(manifest.scale),
            outline: manifest.outline && !args.no_outline,
            output: args.output.clone().unwrap_or(manifest.output),
        }
    }
}

/// Catalog paths in a manifest are relative to the manifest's directory.
fn relative_to_manifest(manifest_path: &Path, catalog: String) -> String {
    if BuiltinCatalogs::get(&catalog).is_some() || Path::new(&catalog).is_absolute() {
        return catalog;
    }
    match manifest_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            dir.join(&catalog).to_string_lossy().into_owned()
        }
        _ => catalog,
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let manifest = Manifest::load_or_default(&args.manifest)?;
    let settings = BuildSettings::resolve(&args, manifest);

    let catalog = Catalog::resolve(&settings.catalog)?;
    let validation = validate_catalog(&catalog);
    if validation.has_errors() {
        print_diagnostics(&validation, printer);
        return Err(BrickError::Build {
            message: format!("Catalog '{}' cannot tile every image", catalog.name),
            help: Some("Fix the errors above, then retry".to_string()),
        });
    }

    let images = collect_images(&args.inputs)?;
    if images.is_empty() {
        return Err(BrickError::Build {
            message: "No images found".to_string(),
            help: Some(format!("Supported extensions: {}", IMAGE_EXTENSIONS.join(", "))),
        });
    }
    check_output_names(&images)?;

    if !settings.output.exists() {
        fs::create_dir_all(&settings.output).map_err(|e| BrickError::Io {
            path: settings.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    printer.info(
        "Catalog",
        &format!(
            "{} ({})",
            catalog.name,
            plural(catalog.len(), "colour", "colours")
        ),
    );

    let packer = TilePacker::new(&catalog);
    for path in &images {
        let bill = convert_image(path, &settings, &catalog, &packer, printer)?;
        println!("{}:", display_path(path));
        print!("{}", bill.to_text());
    }

    printer.status(
        "Finished",
        &format!(
            "{} to {}",
            plural(images.len(), "mosaic", "mosaics"),
            display_path(&settings.output)
        ),
    );

    Ok(())
}

/// Convert one image, writing `<stem>.png` and `<stem>.bom.json`.
fn convert_image(
    path: &Path,
    settings: &BuildSettings,
    catalog: &Catalog,
    packer: &TilePacker,
    printer: &Printer,
) -> Result<BillOfMaterials> {
    let img = image::open(path).map_err(|e| BrickError::Image {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let grid = quantize_image(&img, settings.width, &catalog.palette(), &settings.quantize)?;
    printer.status(
        "Converting",
        &format!("{} ({}x{})", display_path(path), grid.width(), grid.height()),
    );

    let panel = packer.pack(&grid)?;
    let bill = BillOfMaterials::from_panel(&panel);

    let stem = output_stem(path);

    let preview = settings.output.join(format!("{}.png", stem));
    write_png(&render_panel(&panel, settings.scale, settings.outline)?, &preview)?;

    let parts = settings.output.join(format!("{}.bom.json", stem));
    bill.write_json(&parts)?;

    printer.status(
        "Packed",
        &format!(
            "{} -> {}",
            plural(bill.total_pieces(), "piece", "pieces"),
            display_path(&preview)
        ),
    );

    Ok(bill)
}

/// Expand inputs: files are taken as given, directories are walked for
/// images. Directory results are sorted for a stable build order.
fn collect_images(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file() && is_image(p))
                .collect();
            found.sort();
            images.extend(found);
        } else if input.exists() {
            images.push(input.clone());
        } else {
            return Err(BrickError::Io {
                path: input.clone(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    Ok(images)
}

/// Base name shared by an image's preview and parts list.
fn output_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mosaic")
}

/// Every input writes `<stem>.png` and `<stem>.bom.json` into one directory,
/// so two inputs with the same stem would overwrite each other. Stems are
/// compared case-insensitively for case-insensitive filesystems.
fn check_output_names(images: &[PathBuf]) -> Result<()> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    for path in images {
        let key = output_stem(path).to_lowercase();
        if let Some(first) = seen.get(&key) {
            return Err(BrickError::Build {
                message: format!(
                    "{} and {} would both write {}.png",
                    display_path(first),
                    display_path(path),
                    output_stem(path)
                ),
                help: Some("Rename one of the images or build them separately".to_string()),
            });
        }
        seen.insert(key, path);
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
