use anyhow::{anyhow, Context, Result};
use blobscan::image::{label_map_to_gray, load_intensity_grid, save_gray_image};
use blobscan::{detect_blobs, nearest_blob, DEFAULT_QUERY_RADIUS};
use clap::Parser;
use std::path::PathBuf;

/// Parse a query point given as "X,Y".
fn parse_point(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Report bright blobs in an image", long_about = None)]
struct Args {
    #[arg(help = "Input image (PNG, JPEG, TIFF, ...)")]
    input: PathBuf,

    #[arg(short, long, help = "Save the label map as a grayscale image")]
    labels: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_parser = parse_point,
        help = "Query point as X,Y; reports the blob whose seed is nearest"
    )]
    query: Option<(f64, f64)>,

    #[arg(
        short,
        long,
        default_value_t = DEFAULT_QUERY_RADIUS,
        help = "Query match radius in pixels"
    )]
    radius: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let grid = load_intensity_grid(&args.input)
        .map_err(|e| anyhow!("failed to load {}: {e}", args.input.display()))?;

    let registry = detect_blobs(&grid.view())
        .with_context(|| format!("detection failed on {}", args.input.display()))?;

    println!(
        "{}: {} blob(s) in {} grid",
        args.input.display(),
        registry.count(),
        registry.shape()
    );
    for blob in registry.blobs() {
        let (x, y) = blob.seed_xy();
        println!(
            "  blob {:>4}  seed ({x:>6.1}, {y:>6.1})  {} pixel(s)",
            blob.label, blob.pixel_count
        );
    }

    if let Some((x, y)) = args.query {
        match nearest_blob(x, y, &registry, args.radius) {
            Some(label) => {
                let count = registry.pixel_count(label)?;
                println!("query ({x}, {y}): blob {label} ({count} pixel(s))");
            }
            None => println!(
                "query ({x}, {y}): no blob seed within {} pixel(s)",
                args.radius
            ),
        }
    }

    if let Some(path) = &args.labels {
        let gray = label_map_to_gray(registry.label_map());
        save_gray_image(&gray, path)
            .map_err(|e| anyhow!("failed to save {}: {e}", path.display()))?;
        println!("label map written to {}", path.display());
    }

    Ok(())
}
