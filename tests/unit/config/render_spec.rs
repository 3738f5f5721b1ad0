use super::*;

#[test]
fn defaults_are_valid() {
    let spec = RenderSpec::default();
    spec.validate().unwrap();
    assert_eq!(spec.effective_start_size(), 48);
    assert_eq!(spec.padding, 10);
    assert_eq!(spec.min_size, 10);
    assert_eq!(spec.size_step, 2);
    assert_eq!(spec.block_height_ratio, 0.25);
    assert_eq!(spec.overflow, Overflow::Ellipsis);
    assert!(spec.shadow.is_none());
}

#[test]
fn partial_json_keeps_defaults() {
    let spec = RenderSpec::from_json(
        r##"{ "padding": 4, "fill_color": "yellow", "stroke_mode": "offset",
             "shadow": { "dx": 1 }, "font": { "size": 30 } }"##,
    )
    .unwrap();
    assert_eq!(spec.padding, 4);
    assert_eq!(spec.fill_color, Color::rgb(255, 255, 0));
    assert_eq!(spec.stroke_color, Color::BLACK);
    assert_eq!(spec.stroke_mode, StrokeMode::Offset);
    let shadow = spec.shadow.unwrap();
    assert_eq!((shadow.dx, shadow.dy), (1, 3));
    assert_eq!(spec.effective_start_size(), 30);
    assert_eq!(spec.font.fallbacks, FontSpec::default().fallbacks);
}

#[test]
fn negative_padding_is_rejected_not_clamped() {
    assert!(RenderSpec::from_json(r#"{ "padding": -5 }"#).is_err());
}

#[test]
fn out_of_range_values_fail_validation() {
    let cases: Vec<Box<dyn Fn(&mut RenderSpec)>> = vec![
        Box::new(|s| s.min_size = 0),
        Box::new(|s| s.start_size = Some(8)),
        Box::new(|s| s.size_step = 0),
        Box::new(|s| s.line_spacing = 0.9),
        Box::new(|s| s.line_spacing = f32::NAN),
        Box::new(|s| s.block_height_ratio = 0.0),
        Box::new(|s| s.block_height_ratio = 0.6),
        Box::new(|s| s.max_image_dimension = 0),
        Box::new(|s| s.max_image_dimension = 40_000),
        Box::new(|s| s.max_image_bytes = 3),
        Box::new(|s| s.stroke_width_ratio = Some(0.0)),
        Box::new(|s| s.font.size = 0),
    ];
    for (i, mutate) in cases.iter().enumerate() {
        let mut spec = RenderSpec::default();
        mutate(&mut spec);
        assert!(
            matches!(spec.validate(), Err(MemeError::Validation(_))),
            "case {i} should fail"
        );
    }
}

#[test]
fn stroke_ratio_scales_with_size() {
    let mut spec = RenderSpec::default();
    assert_eq!(spec.stroke_width_for(48), 3);
    spec.stroke_width_ratio = Some(0.06);
    assert_eq!(spec.stroke_width_for(48), 3);
    assert_eq!(spec.stroke_width_for(100), 6);
    assert_eq!(spec.stroke_width_for(4), 1);
    assert_eq!(spec.block_style(100).stroke_width, 6);
}

#[test]
fn fit_params_carry_search_policy() {
    let spec = RenderSpec {
        start_size: Some(40),
        ..RenderSpec::default()
    };
    let area = spec.caption_area(520, 400).unwrap();
    let p = spec.fit_params(&area);
    assert_eq!(p.start_size, 40);
    assert_eq!(p.min_size, 10);
    assert_eq!(p.max_width, 500.0);
    assert_eq!(p.max_height, 100.0);
    assert_eq!(p.line_spacing, 1.1);
}

#[test]
fn oversized_font_size_is_rejected() {
    let spec = RenderSpec {
        font: FontSpec::builtin_only(1 << 31),
        ..RenderSpec::default()
    };
    assert!(matches!(spec.validate(), Err(MemeError::Validation(_))));

    let spec = RenderSpec {
        font: FontSpec::builtin_only(MAX_FONT_SIZE + 1),
        max_image_dimension: MAX_IMAGE_DIMENSION_LIMIT,
        ..RenderSpec::default()
    };
    assert!(matches!(spec.validate(), Err(MemeError::Validation(_))));
}

#[test]
fn start_size_beyond_image_limit_is_rejected() {
    let spec = RenderSpec {
        start_size: Some(600),
        max_image_dimension: 500,
        ..RenderSpec::default()
    };
    assert!(matches!(spec.validate(), Err(MemeError::Validation(_))));
}

#[test]
fn oversized_stroke_is_rejected() {
    let spec = RenderSpec {
        stroke_width: MAX_STROKE_WIDTH + 1,
        ..RenderSpec::default()
    };
    assert!(matches!(spec.validate(), Err(MemeError::Validation(_))));

    let spec = RenderSpec {
        stroke_width_ratio: Some(1.5),
        ..RenderSpec::default()
    };
    assert!(matches!(spec.validate(), Err(MemeError::Validation(_))));
}

#[test]
fn relative_ratios_are_range_checked() {
    let cases: Vec<Box<dyn Fn(&mut RenderSpec)>> = vec![
        Box::new(|s| s.start_size_ratio = Some(0.0)),
        Box::new(|s| s.start_size_ratio = Some(1.2)),
        Box::new(|s| s.padding_ratio = Some(-0.1)),
        Box::new(|s| s.padding_ratio = Some(0.5)),
        Box::new(|s| s.max_width_ratio = Some(f32::INFINITY)),
    ];
    for (i, mutate) in cases.iter().enumerate() {
        let mut spec = RenderSpec::default();
        mutate(&mut spec);
        assert!(spec.validate().is_err(), "case {i} should fail");
    }
    RenderSpec::image_relative().validate().unwrap();
}

#[test]
fn start_size_follows_image_height() {
    let spec = RenderSpec {
        start_size_ratio: Some(0.06),
        ..RenderSpec::default()
    };
    assert_eq!(spec.caption_area(600, 400).unwrap().start_size, 24);
    assert_eq!(spec.caption_area(2400, 1600).unwrap().start_size, 96);
    // Never below min_size.
    assert_eq!(spec.caption_area(100, 50).unwrap().start_size, 10);

    let explicit = RenderSpec {
        start_size: Some(30),
        ..spec
    };
    assert_eq!(explicit.caption_area(2400, 1600).unwrap().start_size, 30);
}

#[test]
fn padding_and_width_follow_image_size() {
    let spec = RenderSpec::image_relative();
    let big = spec.caption_area(4000, 3000).unwrap();
    assert_eq!(big.padding, 60);
    assert_eq!(big.max_width, 3800.0);
    assert!((big.max_height - 1050.0).abs() < 0.01);

    let small = spec.caption_area(100, 100).unwrap();
    assert_eq!(small.padding, MIN_RELATIVE_PADDING);
    assert_eq!(small.max_width, 92.0);
}

#[test]
fn padding_leaving_no_width_is_rejected() {
    let spec = RenderSpec {
        padding: 50,
        ..RenderSpec::default()
    };
    assert!(matches!(
        spec.caption_area(100, 100),
        Err(MemeError::Validation(_))
    ));
}
