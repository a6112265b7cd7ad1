use log::warn;
use ndarray::{ArrayD, Ix2};
use std::env;
use std::path::Path;
use std::time::Instant;
use volume_crop::config::autocrop::{self, InputConfig};
use volume_crop::crop::autocrop_with_box;
use volume_crop::diagnostics::{CropReport, TimingBreakdown};
use volume_crop::io::{
    ensure_writable, load_grayscale_array, load_grayscale_stack, save_gray_array,
    save_tensor_local, write_json_file, SaveOptions,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = autocrop::load_config(Path::new(&config_path))?;
    let mut timing = TimingBreakdown::default();

    let start = Instant::now();
    let volume: ArrayD<u8> = match &config.input {
        InputConfig::Image(path) => load_grayscale_array(path)?.into_dyn(),
        InputConfig::Stack(paths) => load_grayscale_stack(paths)?.into_dyn(),
    };
    timing.push("load", elapsed_ms(start));

    let start = Instant::now();
    let (bbox, cropped) = autocrop_with_box(&volume, config.threshold);
    let active_elements = volume.iter().filter(|&&v| v > config.threshold).count();
    timing.push("crop", elapsed_ms(start));

    let cropped_shape = cropped.shape().to_vec();
    let out_path = &config.output.cropped;
    let output = if cropped.is_empty() {
        warn!(
            "no element above {} in {:?}; nothing written",
            config.threshold,
            volume.shape()
        );
        None
    } else {
        let start = Instant::now();
        if cropped.ndim() == 2 {
            let plane = cropped
                .into_dimensionality::<Ix2>()
                .map_err(|e| e.to_string())?;
            ensure_writable(out_path, config.output.allow_overwrite)?;
            save_gray_array(&plane, out_path)?;
        } else {
            let options = SaveOptions {
                allow_overwrite: config.output.allow_overwrite,
                file_ext: config.output.file_ext.clone(),
                key_axes: Some(1),
            };
            save_tensor_local(&cropped, out_path, &options)?;
        }
        timing.push("save", elapsed_ms(start));
        Some(out_path.display().to_string())
    };

    let report = CropReport {
        input_shape: volume.shape().to_vec(),
        threshold: f64::from(config.threshold),
        bounding_box: bbox,
        cropped_shape,
        active_elements,
        output,
        timing,
    };
    write_json_file(&config.output.report_json, &report)?;

    println!(
        "Cropped {:?} -> {:?} ({:.1}% kept, {} active elements)",
        report.input_shape,
        report.cropped_shape,
        100.0 * report.retained_fraction(),
        report.active_elements
    );
    println!(
        "Saved report to {}",
        config.output.report_json.display()
    );

    Ok(())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn usage() -> String {
    "Usage: autocrop <config.json>".to_string()
}
