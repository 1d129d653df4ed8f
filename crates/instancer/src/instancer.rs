//! Variable font instantiation.

use log::debug;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::Glyph as ReadGlyph,
    types::{GlyphId, Tag},
};
use write_fonts::{
    FontBuilder,
    tables::glyf::{GlyfLocaBuilder, Glyph},
};

use crate::{
    AxisSetting,
    error::{Error, Result},
    glyphs::{GlyphInstancer, resolve_composite_bounds},
    location,
    metrics::{FontBounds, MetricDeltas, build_head, build_hmtx},
};

/// Tables that only make sense in a variable font.
const VARIATION_TABLES: [Tag; 8] = [
    Tag::new(b"fvar"),
    Tag::new(b"gvar"),
    Tag::new(b"avar"),
    Tag::new(b"cvar"),
    Tag::new(b"HVAR"),
    Tag::new(b"MVAR"),
    Tag::new(b"VVAR"),
    Tag::new(b"STAT"),
];

/// Tables rebuilt for the instance.
const REBUILT_TABLES: [Tag; 7] = [
    Tag::new(b"glyf"),
    Tag::new(b"loca"),
    Tag::new(b"hmtx"),
    Tag::new(b"head"),
    Tag::new(b"hhea"),
    Tag::new(b"OS/2"),
    Tag::new(b"post"),
];

/// A signature no longer matches once any table changes.
const DROPPED_TABLES: [Tag; 1] = [Tag::new(b"DSIG")];

/// Instantiate a variable font at the given axis settings.
///
/// Axes not mentioned in `settings` are pinned at their default.
///
/// # Errors
///
/// - `Error::NotVariableFont` if the font has no fvar table
/// - `Error::AxisNotFound` / `Error::AxisOutOfRange` for settings the font
///   cannot honor
/// - `Error::NoGlyf` if the font uses CFF outlines
/// - `Error::NoGvar` if the font has no gvar table
pub fn instantiate(data: &[u8], settings: &[AxisSetting]) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;

    let fvar = font.fvar().map_err(|_| Error::NotVariableFont)?;
    let avar = font.avar().ok();
    let coords = location::normalize(&fvar, avar.as_ref(), settings)?;
    debug!("normalized location: {coords:?}");

    let glyf = font.glyf().map_err(|_| Error::NoGlyf)?;
    let loca = font.loca(None).map_err(|_| Error::NoGlyf)?;
    let gvar = font.gvar().map_err(|_| Error::NoGvar)?;

    let num_glyphs = u32::from(font.maxp()?.num_glyphs());
    let hmtx = font.hmtx()?;
    let hhea = font.hhea()?;

    let instancer = GlyphInstancer::new(&gvar, &coords);
    let mut glyphs: Vec<Glyph> = Vec::with_capacity(num_glyphs as usize);
    let mut advances: Vec<u16> = Vec::with_capacity(num_glyphs as usize);
    let mut original_lsbs: Vec<i16> = Vec::with_capacity(num_glyphs as usize);

    for gid in (0..num_glyphs).map(GlyphId::new) {
        // Phantom point 1 sits on the advance; its x delta is the advance delta.
        let advance_delta = match gvar.phantom_point_deltas(&glyf, &loca, &coords, gid) {
            Ok(Some(deltas)) => deltas[1].x.round().to_i32(),
            _ => 0,
        };
        let advance = i32::from(hmtx.advance(gid).unwrap_or(0)) + advance_delta;
        advances.push(advance.clamp(0, i32::from(u16::MAX)) as u16);
        original_lsbs.push(hmtx.side_bearing(gid).unwrap_or(0));

        let glyph = match loca.get_glyf(gid, &glyf)? {
            None => Glyph::Empty,
            Some(ReadGlyph::Simple(simple)) => instancer.simple(gid, &simple),
            Some(ReadGlyph::Composite(composite)) => instancer.composite(gid, &composite),
        };
        glyphs.push(glyph);
    }

    let bboxes = resolve_composite_bounds(&mut glyphs);
    let bounds = FontBounds::collect(&bboxes, &advances);

    // LSB is the glyph's xMin after interpolation; empty glyphs keep theirs.
    let lsbs: Vec<i16> = bboxes
        .iter()
        .zip(&original_lsbs)
        .map(|(bbox, &lsb)| bbox.map_or(lsb, |bbox| bbox.x_min))
        .collect();

    let mut glyf_builder = GlyfLocaBuilder::new();
    for glyph in &glyphs {
        glyf_builder.add_glyph(glyph)?;
    }
    let (new_glyf, new_loca, loca_format) = glyf_builder.build();
    let new_hmtx = build_hmtx(&advances, &lsbs, usize::from(hhea.number_of_h_metrics()));

    let mvar = font.mvar().ok();
    let metric_deltas = MetricDeltas::new(mvar.as_ref(), &coords);

    let mut builder = FontBuilder::new();
    builder.add_table(&new_glyf)?;
    builder.add_table(&new_loca)?;
    builder.add_table(&new_hmtx)?;
    builder.add_table(&metric_deltas.hhea(&hhea, &bounds))?;
    if let Ok(head) = font.head() {
        builder.add_table(&build_head(&head, &bounds, loca_format))?;
    }
    if let Ok(os2) = font.os2() {
        builder.add_table(&metric_deltas.os2(&os2, settings))?;
    }
    if let Ok(post) = font.post() {
        builder.add_table(&metric_deltas.post(&post))?;
    }

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if VARIATION_TABLES.contains(&tag)
            || REBUILT_TABLES.contains(&tag)
            || DROPPED_TABLES.contains(&tag)
        {
            continue;
        }
        if let Some(data) = font.table_data(tag) {
            builder.add_raw(tag, data);
        }
    }

    debug!("instantiated {num_glyphs} glyphs");
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use read_fonts::{FontRef, TableProvider};

    use super::*;

    fn simple_glyph_points(font: &FontRef, glyph_id: u32) -> Option<Vec<(i16, i16)>> {
        let glyf = font.glyf().ok()?;
        let loca = font.loca(None).ok()?;
        match loca.get_glyf(GlyphId::new(glyph_id), &glyf).ok()?? {
            ReadGlyph::Simple(simple) => Some(simple.points().map(|p| (p.x, p.y)).collect()),
            ReadGlyph::Composite(_) => None,
        }
    }

    fn wght(value: f32) -> [AxisSetting; 1] {
        [AxisSetting::from((b"wght", value))]
    }

    #[test]
    fn drops_variation_tables() {
        let result = instantiate(font_test_data::VAZIRMATN_VAR, &wght(400.0)).unwrap();

        let output = FontRef::new(&result).unwrap();
        assert!(output.fvar().is_err());
        assert!(output.gvar().is_err());
        assert!(output.glyf().is_ok());
        assert!(output.hmtx().is_ok());
    }

    #[test]
    fn empty_settings_pin_defaults() {
        let result = instantiate(font_test_data::VAZIRMATN_VAR, &[]).unwrap();
        let default = instantiate(font_test_data::VAZIRMATN_VAR, &wght(400.0)).unwrap();

        let glyf = Tag::new(b"glyf");
        let result = FontRef::new(&result).unwrap();
        let default = FontRef::new(&default).unwrap();
        assert_eq!(
            result.table_data(glyf).map(|data| data.as_bytes().to_vec()),
            default.table_data(glyf).map(|data| data.as_bytes().to_vec())
        );
    }

    #[test]
    fn preserves_glyph_count() {
        let input = FontRef::new(font_test_data::VAZIRMATN_VAR).unwrap();
        let result = instantiate(font_test_data::VAZIRMATN_VAR, &wght(700.0)).unwrap();
        let output = FontRef::new(&result).unwrap();

        assert_eq!(input.maxp().unwrap().num_glyphs(), output.maxp().unwrap().num_glyphs());
    }

    #[test]
    fn outlines_and_advances_follow_the_axis() {
        let light = instantiate(font_test_data::VAZIRMATN_VAR, &wght(100.0)).unwrap();
        let black = instantiate(font_test_data::VAZIRMATN_VAR, &wght(900.0)).unwrap();
        let light = FontRef::new(&light).unwrap();
        let black = FontRef::new(&black).unwrap();

        let light_points = simple_glyph_points(&light, 1).unwrap();
        let black_points = simple_glyph_points(&black, 1).unwrap();
        assert_eq!(light_points.len(), black_points.len());
        assert_ne!(light_points, black_points);

        let gid = GlyphId::new(1);
        assert_ne!(light.hmtx().unwrap().advance(gid), black.hmtx().unwrap().advance(gid));
    }

    #[test]
    fn lsb_equals_glyph_xmin() {
        let result = instantiate(font_test_data::VAZIRMATN_VAR, &wght(500.0)).unwrap();
        let font = FontRef::new(&result).unwrap();
        let hmtx = font.hmtx().unwrap();

        for gid in 1..u32::from(font.maxp().unwrap().num_glyphs()).min(20) {
            let Some(points) = simple_glyph_points(&font, gid).filter(|p| !p.is_empty()) else {
                continue;
            };
            let x_min = points.iter().map(|(x, _)| *x).min().unwrap();
            assert_eq!(hmtx.side_bearing(GlyphId::new(gid)), Some(x_min), "glyph {gid}");
        }
    }

    #[test]
    fn sets_weight_class() {
        let result = instantiate(font_test_data::VAZIRMATN_VAR, &wght(700.0)).unwrap();
        let font = FontRef::new(&result).unwrap();
        if let Ok(os2) = font.os2() {
            assert_eq!(os2.us_weight_class(), 700);
        }
    }

    #[test]
    fn rejects_cff_font() {
        let result = instantiate(font_test_data::CANTARELL_VF_TRIMMED, &wght(700.0));
        assert!(matches!(result, Err(Error::NoGlyf)));
    }

    #[test]
    fn rejects_non_variable_font() {
        let result = instantiate(font_test_data::SIMPLE_GLYF, &wght(400.0));
        assert!(matches!(result, Err(Error::NotVariableFont)));
    }

    #[test]
    fn rejects_unknown_axis() {
        let result =
            instantiate(font_test_data::VAZIRMATN_VAR, &[AxisSetting::from((b"wdth", 100.0))]);
        assert!(matches!(result, Err(Error::AxisNotFound(_))));
    }
}
