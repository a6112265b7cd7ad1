mod common;

use common::synthetic_volume::{box_volume, ramp_u8};
use ndarray::{Array3, Array4, Axis};
use std::fs;
use volume_crop::autocrop;
use volume_crop::io::{
    ensure_writable, load_grayscale_array, load_grayscale_stack, save_gray_array,
    save_tensor_local, write_records_json, SaveOptions,
};

fn png_options() -> SaveOptions {
    SaveOptions {
        file_ext: "png".to_string(),
        ..Default::default()
    }
}

#[test]
fn gray_png_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/ramp.png");
    let ramp = ramp_u8(6, 16);
    save_gray_array(&ramp, &path).unwrap();
    let loaded = load_grayscale_array(&path).unwrap();
    assert_eq!(loaded, ramp);
}

#[test]
fn tensor_slices_are_written_with_padded_keys() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("stack");
    let vol = box_volume((3, 5, 6), [(0, 3), (1, 4), (2, 5)], 90);

    let written = save_tensor_local(&vol, &base, &png_options()).unwrap();
    assert_eq!(written, base);
    let mut names: Vec<String> = fs::read_dir(&base)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["00000.png", "00001.png", "00002.png"]);

    let paths: Vec<_> = names.iter().map(|n| base.join(n)).collect();
    let reloaded = load_grayscale_stack(&paths).unwrap();
    assert_eq!(reloaded, vol);
}

#[test]
fn existing_directory_requires_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("out");
    let vol = Array3::<u8>::from_elem((2, 2, 2), 7);
    save_tensor_local(&vol, &base, &png_options()).unwrap();

    let err = save_tensor_local(&vol, &base, &png_options()).unwrap_err();
    assert!(err.contains("Overwriting has not been enabled"), "{err}");

    let overwrite = SaveOptions {
        allow_overwrite: true,
        ..png_options()
    };
    assert!(save_tensor_local(&vol, &base, &overwrite).is_ok());
}

#[test]
fn existing_image_file_requires_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crop.png");
    ensure_writable(&path, false).unwrap();
    save_gray_array(&ramp_u8(3, 4), &path).unwrap();

    let err = ensure_writable(&path, false).unwrap_err();
    assert!(err.contains("Overwriting has not been enabled"), "{err}");
    assert!(ensure_writable(&path, true).is_ok());
}

#[test]
fn color_and_multi_key_slices_are_supported() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = Array4::<u8>::from_shape_fn((2, 3, 4, 3), |(k, y, x, c)| (k + y + x + c) as u8);
    save_tensor_local(&rgb, &dir.path().join("rgb"), &png_options()).unwrap();
    assert!(dir.path().join("rgb/00001.png").is_file());

    let options = SaveOptions {
        key_axes: Some(2),
        ..png_options()
    };
    let floats = Array4::<f32>::from_elem((2, 2, 3, 3), 0.5);
    save_tensor_local(&floats, &dir.path().join("grid"), &options).unwrap();
    assert!(dir.path().join("grid/00001_00001.png").is_file());
}

#[test]
fn slice_keys_are_derived_from_the_shape() {
    let dir = tempfile::tempdir().unwrap();

    let plane = ramp_u8(4, 5);
    save_tensor_local(&plane, &dir.path().join("plane"), &png_options()).unwrap();
    let loaded = load_grayscale_array(&dir.path().join("plane/00000.png")).unwrap();
    assert_eq!(loaded, plane);

    let grid =
        Array4::<u8>::from_shape_fn((2, 3, 4, 5), |(a, b, y, x)| (a * 60 + b * 20 + y + x) as u8);
    let base = dir.path().join("grid");
    save_tensor_local(&grid, &base, &png_options()).unwrap();
    assert_eq!(fs::read_dir(&base).unwrap().count(), 6);
    let last = load_grayscale_array(&base.join("00001_00002.png")).unwrap();
    let expected = grid.view().index_axis_move(Axis(0), 1).index_axis_move(Axis(0), 2);
    assert_eq!(last, expected);
}

#[test]
fn explicit_key_axes_override_channel_detection() {
    let dir = tempfile::tempdir().unwrap();
    let vol = Array3::<u8>::from_shape_fn((2, 4, 3), |(k, y, x)| (k * 12 + y * 3 + x) as u8);

    save_tensor_local(&vol, &dir.path().join("rgb"), &png_options()).unwrap();
    assert_eq!(fs::read_dir(dir.path().join("rgb")).unwrap().count(), 1);

    let options = SaveOptions {
        key_axes: Some(1),
        ..png_options()
    };
    let base = dir.path().join("gray");
    save_tensor_local(&vol, &base, &options).unwrap();
    let paths = [base.join("00000.png"), base.join("00001.png")];
    assert_eq!(load_grayscale_stack(&paths).unwrap(), vol);
}

#[test]
fn unsupported_slice_shapes_fail() {
    let dir = tempfile::tempdir().unwrap();
    let lines = Array3::<u8>::zeros((2, 3, 7));
    let options = SaveOptions {
        key_axes: Some(2),
        ..png_options()
    };
    let err = save_tensor_local(&lines, &dir.path().join("lines"), &options).unwrap_err();
    assert!(err.contains("Cannot encode slice"), "{err}");
}

#[test]
fn mismatched_stack_images_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    save_gray_array(&ramp_u8(4, 4), &a).unwrap();
    save_gray_array(&ramp_u8(5, 4), &b).unwrap();
    let err = load_grayscale_stack(&[a, b]).unwrap_err();
    assert!(err.contains("Failed to stack images"), "{err}");
}

#[test]
fn records_json_uses_position_and_nested_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let vol = Array3::from_shape_fn((2, 2, 2), |(k, y, x)| k * 4 + y * 2 + x);
    write_records_json(&vol, 1, &path).unwrap();

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(rows.as_array().map(Vec::len), Some(2));
    assert_eq!(rows[1]["position"], serde_json::json!([1]));
    assert_eq!(rows[1]["array_data"], serde_json::json!([[4, 5], [6, 7]]));
}

#[test]
fn autocropped_volume_survives_export() {
    let dir = tempfile::tempdir().unwrap();
    let vol = box_volume((6, 8, 8), [(1, 4), (2, 7), (3, 5)], 255);
    let cropped = autocrop(&vol, 0);
    assert_eq!(cropped.shape(), &[3, 5, 2]);

    let base = dir.path().join("cropped");
    save_tensor_local(&cropped, &base, &png_options()).unwrap();
    let paths: Vec<_> = (0..cropped.len_of(Axis(0)))
        .map(|k| base.join(format!("{k:05}.png")))
        .collect();
    assert_eq!(load_grayscale_stack(&paths).unwrap(), cropped);
}
