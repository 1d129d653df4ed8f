use font_instancer::{AxisSetting, Error, instantiate};
use read_fonts::{FontRef, TableProvider, types::GlyphId};

fn wght(value: f32) -> [AxisSetting; 1] {
    [AxisSetting::from((b"wght", value))]
}

#[test]
fn instances_across_the_axis_are_static() {
    for value in [100.0, 300.0, 400.0, 650.0, 900.0] {
        let data = instantiate(font_test_data::VAZIRMATN_VAR, &wght(value)).unwrap();
        let font = FontRef::new(&data).unwrap();

        assert!(font.fvar().is_err(), "wght={value}");
        assert!(font.avar().is_err(), "wght={value}");
        assert!(font.mvar().is_err(), "wght={value}");
        assert!(font.glyf().is_ok(), "wght={value}");
    }
}

#[test]
fn advances_follow_weight() {
    let advance = |value: f32| {
        let data = instantiate(font_test_data::VAZIRMATN_VAR, &wght(value)).unwrap();
        let font = FontRef::new(&data).unwrap();
        let hmtx = font.hmtx().unwrap();
        (0..u32::from(font.maxp().unwrap().num_glyphs()))
            .map(|gid| u32::from(hmtx.advance(GlyphId::new(gid)).unwrap_or(0)))
            .sum::<u32>()
    };

    assert_ne!(advance(100.0), advance(900.0));
}

#[test]
fn values_outside_the_font_range_are_rejected() {
    for value in [99.0, 901.0] {
        match instantiate(font_test_data::VAZIRMATN_VAR, &wght(value)) {
            Err(Error::AxisOutOfRange { min, max, .. }) => {
                assert_eq!((min, max), (100.0, 900.0));
            }
            other => panic!("wght={value}: expected range error, got {other:?}"),
        }
    }
}

#[test]
fn garbage_is_a_parse_error() {
    assert!(matches!(instantiate(b"not a font", &[]), Err(Error::Parse(_))));
}
