use super::*;
use crate::fonts::source::FontSpec;

fn resolver() -> FontResolver {
    FontResolver::new(&FontSpec::builtin_only(48)).unwrap()
}

fn params(max_width: f32, max_height: f32) -> FitParams {
    FitParams {
        start_size: 48,
        min_size: DEFAULT_MIN_SIZE,
        size_step: DEFAULT_SIZE_STEP,
        max_width,
        max_height,
        line_spacing: DEFAULT_LINE_SPACING,
    }
}

#[test]
fn short_text_fits_at_start_size() {
    let mut fonts = resolver();
    let out = fit("HELLO", &mut fonts, &params(560.0, 100.0)).unwrap();
    let FitOutcome::Fitted(block) = out else {
        panic!("expected fit");
    };
    assert_eq!(block.size_px, 48);
    assert_eq!(block.lines, vec!["HELLO".to_string()]);
    assert_eq!(block.block_width, 174.0);
    assert!((block.block_height - 52.8).abs() < 1e-3);
}

#[test]
fn narrow_width_shrinks_until_fit() {
    let mut fonts = resolver();
    // Built-in widths for HELLO: 174 (48px), 145 (40px), 116 (32px), 87 (24..31px).
    let block = fit("HELLO", &mut fonts, &params(100.0, 100.0))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(block.size_px, 30);
    assert!(block.block_width <= 100.0);
}

#[test]
fn long_caption_terminates_at_or_above_min_size() {
    let mut fonts = resolver();
    let word = "MEME ";
    let text = word.repeat(60);
    assert_eq!(text.len(), 300);

    let p = params(560.0, 100.0);
    let out = fit(&text, &mut fonts, &p).unwrap();
    assert!(out.block().size_px >= p.min_size);
    assert!(fonts.cached_sizes() as u32 <= p.max_iterations() + 1);
}

#[test]
fn unbreakable_token_exhausts_at_min_size() {
    let mut fonts = resolver();
    let p = params(50.0, 100.0);
    let out = fit(&"W".repeat(100), &mut fonts, &p).unwrap();
    assert!(out.is_exhausted());
    assert_eq!(out.block().size_px, p.min_size);
    assert_eq!(out.block().lines.len(), 1);
    assert!(matches!(
        out.into_result(),
        Err(MemeError::TextDoesNotFit { size_px: 10, .. })
    ));
}

#[test]
fn min_line_taller_than_slot_is_a_hard_failure() {
    let mut fonts = resolver();
    let err = fit("HI", &mut fonts, &params(500.0, 5.0)).unwrap_err();
    match err {
        MemeError::TextDoesNotFit {
            size_px,
            needed_px,
            limit_px,
        } => {
            assert_eq!(size_px, 10);
            assert!((needed_px - 11.0).abs() < 1e-3);
            assert_eq!(limit_px, 5.0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn fit_invariant_holds_across_inputs() {
    let texts = [
        "ONE DOES NOT SIMPLY",
        "WALK INTO MORDOR WITHOUT A PROPER TEST SUITE AND A LOT OF PATIENCE",
        "X",
        "AN EXTRAORDINARILY LONGWINDED CAPTION THAT KEEPS GOING AND GOING AND GOING AND GOING",
    ];
    for text in texts {
        for max_width in [40.0f32, 120.0, 300.0, 560.0] {
            let p = params(max_width, 100.0);
            let mut fonts = resolver();
            match fit(text, &mut fonts, &p).unwrap() {
                FitOutcome::Fitted(block) => {
                    assert!(block.block_width <= max_width, "{text} @ {max_width}");
                    assert!(block.block_height <= 100.0);
                }
                FitOutcome::Exhausted { block, .. } => {
                    assert_eq!(block.size_px, p.min_size);
                    let mut fresh = resolver();
                    for size in p.min_size..=p.start_size {
                        let font = fresh.handle(size).unwrap();
                        let b = TextBlock::wrapped(text, font, max_width, p.line_spacing);
                        assert!(!b.fits(max_width, 100.0), "{text} fits at {size}");
                    }
                }
            }
        }
    }
}

#[test]
fn iteration_ceiling_matches_range() {
    assert_eq!(params(1.0, 1.0).max_iterations(), 20);
    let p = FitParams {
        start_size: 10,
        ..params(1.0, 1.0)
    };
    assert_eq!(p.max_iterations(), 1);
}

#[test]
fn out_of_range_params_are_rejected() {
    let mut fonts = resolver();
    let bad = [
        FitParams {
            start_size: 8,
            ..params(100.0, 100.0)
        },
        FitParams {
            size_step: 0,
            ..params(100.0, 100.0)
        },
        FitParams {
            line_spacing: 0.5,
            ..params(100.0, 100.0)
        },
        params(-1.0, 100.0),
        FitParams {
            start_size: 1 << 31,
            ..params(100.0, 100.0)
        },
    ];
    for p in bad {
        assert!(matches!(
            fit("HI", &mut fonts, &p),
            Err(MemeError::Validation(_))
        ));
    }
}
