use std::env;
use std::path::Path;
use std::time::Instant;
use volume_crop::config::labels;
use volume_crop::crop::bounding_box;
use volume_crop::diagnostics::{LabelReport, LabelSummary, TimingBreakdown};
use volume_crop::io::{load_grayscale_stack, write_json_file};
use volume_crop::viz::{
    display_shape, label_masks, rotation_azimuths, stack_frame_indices, ROTATION_ELEVATION_DEG,
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
    let config = labels::load_config(Path::new(&config_path))?;
    let mut timing = TimingBreakdown::default();

    let start = Instant::now();
    let volume = load_grayscale_stack(&config.inputs)?;
    timing.push("load", elapsed_ms(start));

    let start = Instant::now();
    let masks = label_masks(&volume, &config.labels);
    let summaries: Vec<LabelSummary> = masks
        .iter()
        .map(|m| LabelSummary {
            label: m.label,
            voxels: m.voxels,
            color_fraction: m.color_fraction,
            bounding_box: bounding_box(&m.mask),
        })
        .collect();
    timing.push("label_masks", elapsed_ms(start));

    let (depth, rows, cols) = volume.dim();
    let frames = config.animation.frames;
    let report = LabelReport {
        input_shape: vec![depth, rows, cols],
        display_shape: display_shape([depth, rows, cols], config.labels.flip),
        labels: summaries,
        stack_frames: stack_frame_indices(depth, frames, config.animation.bounce),
        rotation_elevation_deg: ROTATION_ELEVATION_DEG,
        rotation_azimuths_deg: rotation_azimuths(frames),
        timing,
    };
    write_json_file(&config.output.report_json, &report)?;

    for summary in &report.labels {
        println!(
            "label {:>3}: {} voxels, bbox {:?}",
            summary.label,
            summary.voxels,
            summary.bounding_box.ranges()
        );
    }
    println!(
        "Saved {} label summaries to {}",
        report.labels.len(),
        config.output.report_json.display()
    );

    Ok(())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn usage() -> String {
    "Usage: label_report <config.json>".to_string()
}
