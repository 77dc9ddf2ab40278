use card_scan::edges::{binarize, gradient, hysteresis, morphology, nms};
use card_scan::detector::contours::trace_contours;
use card_scan::pipeline::SENSITIVITY_PASSES;
use card_scan::preprocess::{contrast, denoise, grayscale};
use card_scan::{crop_region, detect_cards, DetectionConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cardtool", version, about = "Card detection CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run card detection on a single image
    Detect {
        #[arg(long)]
        image: PathBuf,
        /// Write each detected region as a PNG into this directory
        #[arg(long)]
        crop_dir: Option<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print per-stage statistics for an image
    Diagnose {
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Expected width/height ratio of a card
    #[arg(long)]
    aspect_ratio: Option<f32>,
    /// Fractional aspect ratio tolerance
    #[arg(long)]
    tolerance: Option<f32>,
    /// Minimum card bounding-box area in pixels
    #[arg(long)]
    min_area: Option<u32>,
    /// Maximum card bounding-box area in pixels
    #[arg(long)]
    max_area: Option<u32>,
}

impl ConfigArgs {
    fn to_config(&self) -> DetectionConfig {
        let defaults = DetectionConfig::default();
        DetectionConfig {
            target_aspect_ratio: self.aspect_ratio.unwrap_or(defaults.target_aspect_ratio),
            aspect_ratio_tolerance: self.tolerance.unwrap_or(defaults.aspect_ratio_tolerance),
            min_card_area: self.min_area.unwrap_or(defaults.min_card_area),
            max_card_area: self.max_area.unwrap_or(defaults.max_card_area),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Detect {
            image,
            crop_dir,
            config,
        } => detect_cmd(&image, crop_dir.as_deref(), &config.to_config()),
        Command::Diagnose { image, config } => diagnose_cmd(&image, &config.to_config()),
    }
}

fn load_rgba(path: &Path) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok((img.into_raw(), width as usize, height as usize))
}

fn detect_cmd(image: &Path, crop_dir: Option<&Path>, config: &DetectionConfig) {
    let (pixels, width, height) = match load_rgba(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };

    let start = Instant::now();
    let regions = match detect_cards(&pixels, width, height, config) {
        Ok(regions) => regions,
        Err(err) => {
            eprintln!("Detection failed: {err}");
            return;
        }
    };
    let elapsed = start.elapsed();

    println!("Image: {} ({}x{})", image.display(), width, height);
    println!("Found {} card region(s) in {:.1?}", regions.len(), elapsed);
    for region in &regions {
        println!(
            "  {}: ({}, {}) {}x{} {:?} confidence={:.3}",
            region.id,
            region.x,
            region.y,
            region.width,
            region.height,
            region.orientation,
            region.confidence
        );
    }

    let Some(dir) = crop_dir else { return };
    if let Err(err) = std::fs::create_dir_all(dir) {
        eprintln!("Failed to create {}: {}", dir.display(), err);
        return;
    }
    for region in &regions {
        let cropped = match crop_region(&pixels, width as u32, height as u32, region, None) {
            Ok(cropped) => cropped,
            Err(err) => {
                eprintln!("Failed to crop {}: {}", region.id, err);
                continue;
            }
        };
        let path = dir.join(format!("{}.png", region.id));
        let saved = image::RgbaImage::from_raw(cropped.width, cropped.height, cropped.pixels)
            .map(|img| img.save(&path));
        match saved {
            Some(Ok(())) => println!("  wrote {}", path.display()),
            Some(Err(err)) => eprintln!("Failed to save {}: {}", path.display(), err),
            None => eprintln!("Crop buffer for {} has wrong size", region.id),
        }
    }
}

fn diagnose_cmd(image: &Path, config: &DetectionConfig) {
    let (pixels, width, height) = match load_rgba(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };

    println!("Image: {} ({}x{})", image.display(), width, height);

    let gray = grayscale::rgba_to_luma(&pixels, width, height);
    print_stats("grayscale", &gray);

    let stretched = contrast::stretch_contrast(&gray, width, height);
    print_stats("stretched", &stretched);

    let equalized = contrast::equalize_local_contrast(&stretched, width, height);
    print_stats("equalized", &equalized);

    let filtered = denoise::bilateral_filter(&equalized, width, height);
    let blurred = denoise::gaussian_blur(&filtered, width, height);
    let blurred = denoise::gaussian_blur(&blurred, width, height);
    print_stats("blurred", &blurred);

    println!("Threshold offset C = {:.2}", binarize::threshold_offset(&gray));

    for pass in SENSITIVITY_PASSES {
        let field = gradient::sobel_gradients(&blurred, width, height);
        let suppressed = nms::non_maximum_suppression(&field, width, height);
        let edges = hysteresis::hysteresis_threshold(
            &suppressed,
            width,
            height,
            pass.low_threshold,
            pass.high_threshold,
        );
        let edge_pixels = edges.iter().filter(|&&v| v == 255).count();

        let closed = morphology::close(&edges, width, height);
        let thickened = morphology::dilate(&closed, width, height);
        let binary = binarize::adaptive_binarize(&thickened, width, height, &gray);
        let contours = trace_contours(&binary, width, height);

        println!(
            "pass {}: thresholds {}/{}, edge_pixels={}, contours={}",
            pass.label,
            pass.low_threshold,
            pass.high_threshold,
            edge_pixels,
            contours.len()
        );
        for (i, contour) in contours.iter().take(10).enumerate() {
            println!(
                "  contour {}: bounds=({}, {}) {}x{} points={} edge_points={}",
                i,
                contour.bounds.x,
                contour.bounds.y,
                contour.bounds.width,
                contour.bounds.height,
                contour.points.len(),
                contour.edge_points.len()
            );
        }
    }

    match detect_cards(&pixels, width, height, config) {
        Ok(regions) => println!("Full detection found {} region(s)", regions.len()),
        Err(err) => eprintln!("Detection failed: {err}"),
    }
}

fn print_stats(label: &str, data: &[u8]) {
    let min = data.iter().min().copied().unwrap_or(0);
    let max = data.iter().max().copied().unwrap_or(0);
    let avg = data.iter().map(|&v| v as u64).sum::<u64>() / data.len().max(1) as u64;
    println!("{label}: range {min}-{max}, average {avg}");
}
