// Host-side tests for configuration parsing, masks and error messages.

use particles_core::{
    AudioSource, CaptureError, ConfigError, ParticleConfig, RasterMask, Rgb, ShapeType,
};

#[test]
fn defaults_match_first_launch() {
    let c = ParticleConfig::default();
    assert_eq!(c.shape, ShapeType::Heart);
    assert_eq!(c.color.to_string(), "#3b82f6");
    assert!(!c.sound_enabled);
    assert!(c.mask.is_none());
}

#[test]
fn shapes_parse_case_insensitively() {
    assert_eq!("saturn".parse::<ShapeType>(), Ok(ShapeType::Saturn));
    assert_eq!(" FireWorks ".parse::<ShapeType>(), Ok(ShapeType::Fireworks));
    for shape in ShapeType::ALL {
        assert_eq!(shape.to_string().parse::<ShapeType>(), Ok(shape));
    }
    assert_eq!(
        "cube".parse::<ShapeType>(),
        Err(ConfigError::UnknownShape("cube".into()))
    );
}

#[test]
fn colours_parse_with_or_without_hash() {
    assert_eq!("#ff8000".parse::<Rgb>(), Ok(Rgb([255, 128, 0])));
    assert_eq!("00FF7f".parse::<Rgb>(), Ok(Rgb([0, 255, 127])));
    assert!("#fff".parse::<Rgb>().is_err());
    assert!("#gg0000".parse::<Rgb>().is_err());
    assert!("#ffé000".parse::<Rgb>().is_err());
    let c = Rgb([255, 0, 51]).to_f32();
    assert_eq!(c[0], 1.0);
    assert!((c[2] - 0.2).abs() < 1e-6);
}

#[test]
fn mask_rejects_wrong_buffer_length() {
    let err = RasterMask::new(2, 2, vec![0; 15]).unwrap_err();
    assert_eq!(
        err,
        ConfigError::MaskSize {
            width: 2,
            height: 2,
            expected: 16,
            actual: 15
        }
    );
}

#[test]
fn fit_within_keeps_aspect_and_small_masks() {
    let wide = RasterMask::new(400, 100, vec![0; 400 * 100 * 4]).unwrap();
    let fitted = wide.fit_within(200);
    assert_eq!((fitted.width(), fitted.height()), (200, 50));
    assert_eq!(fitted.rgba().len(), 200 * 50 * 4);

    let tall = RasterMask::new(30, 600, vec![0; 30 * 600 * 4]).unwrap();
    let fitted = tall.fit_within(200);
    assert_eq!((fitted.width(), fitted.height()), (10, 200));

    let small = RasterMask::new(150, 90, vec![7; 150 * 90 * 4]).unwrap();
    assert_eq!(small.clone().fit_within(200), small);

    let sliver = RasterMask::new(1000, 3, vec![0; 1000 * 3 * 4]).unwrap();
    let fitted = sliver.fit_within(200);
    assert_eq!((fitted.width(), fitted.height()), (200, 1));
}

#[test]
fn fit_within_samples_nearest_pixel() {
    // left half red, right half blue
    let mut rgba = Vec::new();
    for _y in 0..4 {
        for x in 0..4 {
            if x < 2 {
                rgba.extend_from_slice(&[255, 0, 0, 255]);
            } else {
                rgba.extend_from_slice(&[0, 0, 255, 255]);
            }
        }
    }
    let mask = RasterMask::new(4, 4, rgba).unwrap().fit_within(2);
    assert_eq!(mask.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(mask.pixel(1, 1), [0, 0, 255, 255]);
}

#[test]
fn capture_errors_have_user_messages() {
    let missing = CaptureError::MissingTrack {
        input: AudioSource::System,
    };
    assert!(missing.user_message().contains("Share Audio"));
    assert!(missing.to_string().contains("system/tab"));

    let init = CaptureError::DetectorInit("webcam busy".into());
    assert_eq!(init.user_message(), "Camera access denied. Gestures disabled.");
    assert!(init.to_string().contains("webcam busy"));

    let denied = CaptureError::PermissionDenied {
        device: "microphone".into(),
    };
    assert_eq!(denied.user_message(), "Access to the microphone was denied.");
}

#[test]
fn fit_within_leaves_empty_masks_alone() {
    let empty = RasterMask::new(0, 300, vec![]).unwrap();
    let fitted = empty.clone().fit_within(200);
    assert_eq!(fitted, empty);

    let flat = RasterMask::new(500, 0, vec![]).unwrap().fit_within(200);
    assert_eq!((flat.width(), flat.height()), (500, 0));
}

#[test]
fn linear_components_follow_srgb_curve() {
    let [r, g, b] = Rgb([0x3b, 0x82, 0xf6]).to_linear();
    assert!((r - 0.0437).abs() < 1e-3, "r {r}");
    assert!((g - 0.2232).abs() < 1e-3, "g {g}");
    assert!((b - 0.9216).abs() < 1e-3, "b {b}");

    assert_eq!(Rgb([0, 0, 0]).to_linear(), [0.0; 3]);
    let [w, ..] = Rgb([255, 255, 255]).to_linear();
    assert!((w - 1.0).abs() < 1e-6);
    // the toe is linear
    let [low, ..] = Rgb([10, 0, 0]).to_linear();
    assert!((low - 10.0 / 255.0 / 12.92).abs() < 1e-7);
}
