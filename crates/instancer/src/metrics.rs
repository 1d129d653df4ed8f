//! Horizontal metrics and the global tables that summarize them.

use read_fonts::{
    tables::{
        head::Head as ReadHead, hhea::Hhea as ReadHhea, mvar::Mvar, mvar::tags, os2::Os2 as ReadOs2,
        post::Post as ReadPost,
    },
    types::{F2Dot14, Tag},
};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{
        glyf::Bbox,
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        os2::Os2,
        post::Post,
    },
};

use crate::AxisSetting;

const WGHT: Tag = Tag::new(b"wght");
const WDTH: Tag = Tag::new(b"wdth");

/// Extremes over all glyph boxes and advances, as stored in `head` and `hhea`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FontBounds {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
}

impl FontBounds {
    /// Fold every glyph's box and advance; `None` boxes (empty glyphs) only
    /// contribute their advance.
    pub fn collect(bboxes: &[Option<Bbox>], advances: &[u16]) -> Self {
        let mut bounds: Option<FontBounds> = None;
        let mut advance_width_max = 0;

        for (bbox, &advance) in bboxes.iter().zip(advances) {
            advance_width_max = advance_width_max.max(advance);
            let Some(bbox) = bbox.filter(|b| *b != Bbox::default()) else {
                continue;
            };

            let width = bbox.x_max.saturating_sub(bbox.x_min);
            let rsb = (advance as i16).saturating_sub(bbox.x_min).saturating_sub(width);
            let extent = bbox.x_min.saturating_add(width);

            bounds = Some(match bounds {
                None => FontBounds {
                    x_min: bbox.x_min,
                    y_min: bbox.y_min,
                    x_max: bbox.x_max,
                    y_max: bbox.y_max,
                    advance_width_max: 0,
                    min_left_side_bearing: bbox.x_min,
                    min_right_side_bearing: rsb,
                    x_max_extent: extent,
                },
                Some(acc) => FontBounds {
                    x_min: acc.x_min.min(bbox.x_min),
                    y_min: acc.y_min.min(bbox.y_min),
                    x_max: acc.x_max.max(bbox.x_max),
                    y_max: acc.y_max.max(bbox.y_max),
                    advance_width_max: 0,
                    min_left_side_bearing: acc.min_left_side_bearing.min(bbox.x_min),
                    min_right_side_bearing: acc.min_right_side_bearing.min(rsb),
                    x_max_extent: acc.x_max_extent.max(extent),
                },
            });
        }

        FontBounds { advance_width_max, ..bounds.unwrap_or_default() }
    }
}

/// Build `hmtx`, keeping the original split between long metrics and
/// trailing side bearings.
pub(crate) fn build_hmtx(advances: &[u16], lsbs: &[i16], num_long_metrics: usize) -> Hmtx {
    let split = num_long_metrics.min(advances.len());
    let h_metrics = advances[..split]
        .iter()
        .zip(&lsbs[..split])
        .map(|(&advance, &side_bearing)| LongMetric { advance, side_bearing })
        .collect();
    let left_side_bearings = lsbs[split..].to_vec();

    Hmtx { h_metrics, left_side_bearings }
}

pub(crate) fn build_head(original: &ReadHead, bounds: &FontBounds, loca_format: LocaFormat) -> Head {
    let mut head: Head = original.to_owned_table();
    head.x_min = bounds.x_min;
    head.y_min = bounds.y_min;
    head.x_max = bounds.x_max;
    head.y_max = bounds.y_max;
    head.index_to_loc_format = match loca_format {
        LocaFormat::Short => 0,
        LocaFormat::Long => 1,
    };
    head
}

/// MVAR deltas at one location.
pub(crate) struct MetricDeltas<'a> {
    mvar: Option<&'a Mvar<'a>>,
    coords: &'a [F2Dot14],
}

impl<'a> MetricDeltas<'a> {
    pub fn new(mvar: Option<&'a Mvar<'a>>, coords: &'a [F2Dot14]) -> Self {
        Self { mvar, coords }
    }

    fn delta(&self, tag: Tag) -> i32 {
        self.mvar
            .and_then(|mvar| mvar.metric_delta(tag, self.coords).ok())
            .map(|delta| delta.round().to_i32())
            .unwrap_or(0)
    }

    /// `value` moved by the delta for `tag`, saturated to `i16`.
    fn apply(&self, value: i16, tag: Tag) -> i16 {
        (i32::from(value) + self.delta(tag)).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
    }

    pub fn hhea(&self, original: &ReadHhea, bounds: &FontBounds) -> Hhea {
        let mut hhea: Hhea = original.to_owned_table();
        hhea.ascender = self.apply(original.ascender().to_i16(), tags::HASC).into();
        hhea.descender = self.apply(original.descender().to_i16(), tags::HDSC).into();
        hhea.line_gap = self.apply(original.line_gap().to_i16(), tags::HLGP).into();
        hhea.caret_slope_rise = self.apply(original.caret_slope_rise(), tags::HCRS);
        hhea.caret_slope_run = self.apply(original.caret_slope_run(), tags::HCRN);
        hhea.caret_offset = self.apply(original.caret_offset(), tags::HCOF);
        hhea.advance_width_max = bounds.advance_width_max.into();
        hhea.min_left_side_bearing = bounds.min_left_side_bearing.into();
        hhea.min_right_side_bearing = bounds.min_right_side_bearing.into();
        hhea.x_max_extent = bounds.x_max_extent.into();
        hhea
    }

    /// `OS/2` with MVAR deltas applied and weight/width classes taken from
    /// the instance location.
    pub fn os2(&self, original: &ReadOs2, settings: &[AxisSetting]) -> Os2 {
        let mut os2: Os2 = original.to_owned_table();

        for setting in settings {
            match setting.tag {
                WGHT => os2.us_weight_class = setting.value.round().clamp(1.0, 1000.0) as u16,
                WDTH => os2.us_width_class = width_class(setting.value),
                _ => (),
            }
        }

        os2.s_typo_ascender = self.apply(original.s_typo_ascender(), tags::HASC);
        os2.s_typo_descender = self.apply(original.s_typo_descender(), tags::HDSC);
        os2.s_typo_line_gap = self.apply(original.s_typo_line_gap(), tags::HLGP);
        os2.y_strikeout_size = self.apply(original.y_strikeout_size(), tags::STRS);
        os2.y_strikeout_position = self.apply(original.y_strikeout_position(), tags::STRO);
        os2.y_subscript_x_size = self.apply(original.y_subscript_x_size(), tags::SBXS);
        os2.y_subscript_y_size = self.apply(original.y_subscript_y_size(), tags::SBYS);
        os2.y_subscript_x_offset = self.apply(original.y_subscript_x_offset(), tags::SBXO);
        os2.y_subscript_y_offset = self.apply(original.y_subscript_y_offset(), tags::SBYO);
        os2.y_superscript_x_size = self.apply(original.y_superscript_x_size(), tags::SPXS);
        os2.y_superscript_y_size = self.apply(original.y_superscript_y_size(), tags::SPYS);
        os2.y_superscript_x_offset = self.apply(original.y_superscript_x_offset(), tags::SPXO);
        os2.y_superscript_y_offset = self.apply(original.y_superscript_y_offset(), tags::SPYO);
        os2.sx_height = original.sx_height().map(|value| self.apply(value, tags::XHGT));
        os2.s_cap_height = original.s_cap_height().map(|value| self.apply(value, tags::CPHT));

        os2
    }

    pub fn post(&self, original: &ReadPost) -> Post {
        let mut post: Post = original.to_owned_table();
        post.underline_position =
            self.apply(original.underline_position().to_i16(), tags::UNDO).into();
        post.underline_thickness =
            self.apply(original.underline_thickness().to_i16(), tags::UNDS).into();
        post
    }
}

/// Map a `wdth` percentage to the nine `usWidthClass` buckets, splitting at
/// the midpoints between the nominal widths.
pub(crate) fn width_class(wdth: f32) -> u16 {
    const NOMINAL: [f32; 9] = [50.0, 62.5, 75.0, 87.5, 100.0, 112.5, 125.0, 150.0, 200.0];

    NOMINAL
        .windows(2)
        .position(|pair| wdth <= (pair[0] + pair[1]) / 2.0)
        .map_or(9, |index| index as u16 + 1)
}
