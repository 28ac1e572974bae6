use higher_order_gradient::config::tool::load_config;
use higher_order_gradient::gradient::{GradientConfig, GradientFilter, GradientImage};
use higher_order_gradient::image::io::{
    load_grayscale_image, save_grayscale_normalized, write_json_file,
};
use higher_order_gradient::image::{NdImage, NdImageView};
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut image = load_grayscale_image(&config.input)?;
    if let Some(spacing) = config.spacing {
        image = image.with_spacing(&spacing).map_err(|e| e.to_string())?;
    }

    let mut filter = GradientFilter::new(config.gradient);
    if let Some(pieces) = config.pieces {
        filter = filter.with_pieces(pieces);
    }
    let radius = filter.required_padding().map_err(|e| e.to_string())?;

    let start = Instant::now();
    let gradient = filter.compute(&image).map_err(|e| e.to_string())?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let magnitude = gradient.magnitude();
    save_grayscale_normalized(&magnitude, &config.output.magnitude_image)?;

    let summary = GradientSummary::new(&gradient, &magnitude, &config.gradient, radius, elapsed_ms);
    write_json_file(&config.output.summary_json, &summary)?;

    println!("{}", filter.config());
    println!(
        "Saved gradient magnitude to {} ({}x{}, radius {}, {} pieces, {:.3} ms)",
        config.output.magnitude_image.display(),
        summary.width,
        summary.height,
        radius,
        filter.pieces(),
        elapsed_ms
    );
    println!("Saved summary to {}", config.output.summary_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: gradient_tool <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GradientSummary {
    width: usize,
    height: usize,
    accuracy_order: usize,
    kernel_radius: usize,
    use_image_spacing: bool,
    use_image_direction: bool,
    max_magnitude: f32,
    mean_magnitude: f32,
    elapsed_ms: f64,
}

impl GradientSummary {
    fn new(
        gradient: &GradientImage,
        magnitude: &NdImage,
        config: &GradientConfig,
        kernel_radius: usize,
        elapsed_ms: f64,
    ) -> Self {
        let samples = magnitude.samples();
        let max_magnitude = samples.iter().copied().fold(0.0f32, f32::max);
        let mean_magnitude = if samples.is_empty() {
            0.0
        } else {
            samples.iter().sum::<f32>() / samples.len() as f32
        };
        Self {
            width: gradient.shape()[0],
            height: gradient.shape()[1],
            accuracy_order: config.accuracy_order,
            kernel_radius,
            use_image_spacing: config.use_image_spacing,
            use_image_direction: config.use_image_direction,
            max_magnitude,
            mean_magnitude,
            elapsed_ms,
        }
    }
}
