//! Outline interpolation: gvar deltas applied to simple and composite glyphs.

use kurbo::{Point as KPoint, Vec2};
use read_fonts::{
    tables::{
        glyf::{
            Anchor, CompositeGlyph as ReadCompositeGlyph, CompositeGlyphFlags, CurvePoint,
            SimpleGlyph as ReadSimpleGlyph,
        },
        gvar::Gvar,
    },
    types::{F2Dot14, Fixed, GlyphId, Point},
};
use write_fonts::tables::glyf::{
    Bbox, Component, ComponentFlags, CompositeGlyph, Contour, Glyph, SimpleGlyph,
};

/// Every glyph in gvar carries four extra "phantom" points after its outline.
const PHANTOM_POINTS: usize = 4;

/// Applies the variation deltas of one location to individual glyphs.
pub(crate) struct GlyphInstancer<'a> {
    gvar: &'a Gvar<'a>,
    coords: &'a [F2Dot14],
}

impl<'a> GlyphInstancer<'a> {
    pub(crate) fn new(gvar: &'a Gvar<'a>, coords: &'a [F2Dot14]) -> Self {
        Self { gvar, coords }
    }

    /// Sum the deltas of every active tuple for a glyph with `reference` as its
    /// default outline (phantom points excluded).
    ///
    /// Sparse tuples are completed with IUP before being added, so the result
    /// has one entry per outline point plus the phantom points.
    fn accumulate(&self, glyph_id: GlyphId, reference: &[KPoint], end_pts: &[usize]) -> Vec<Vec2> {
        let len = reference.len() + PHANTOM_POINTS;
        let mut total = vec![Vec2::ZERO; len];

        let Ok(Some(var_data)) = self.gvar.glyph_variation_data(glyph_id) else {
            return total;
        };

        for (tuple, scalar) in var_data.active_tuples_at(self.coords) {
            if tuple.has_deltas_for_all_points() {
                for delta in tuple.deltas() {
                    if let Some(slot) = total.get_mut(delta.position as usize) {
                        *slot += to_vec2(delta.apply_scalar(scalar));
                    }
                }
                continue;
            }

            let mut sparse: Vec<Option<Vec2>> = vec![None; len];
            for delta in tuple.deltas() {
                if let Some(slot) = sparse.get_mut(delta.position as usize) {
                    *slot = Some(to_vec2(delta.apply_scalar(scalar)));
                }
            }
            interpolate_untouched(&mut sparse[..reference.len()], reference, end_pts);

            for (slot, delta) in total.iter_mut().zip(sparse) {
                *slot += delta.unwrap_or(Vec2::ZERO);
            }
        }

        total
    }

    pub(crate) fn simple(&self, glyph_id: GlyphId, glyph: &ReadSimpleGlyph) -> Glyph {
        let points: Vec<CurvePoint> = glyph.points().collect();
        if points.is_empty() {
            return Glyph::Empty;
        }

        let end_pts: Vec<usize> =
            glyph.end_pts_of_contours().iter().map(|end| end.get() as usize).collect();
        let reference: Vec<KPoint> =
            points.iter().map(|p| KPoint::new(f64::from(p.x), f64::from(p.y))).collect();
        let deltas = self.accumulate(glyph_id, &reference, &end_pts);

        let moved: Vec<CurvePoint> = points
            .iter()
            .zip(&deltas)
            .map(|(point, delta)| {
                CurvePoint::new(
                    round_i16(f64::from(point.x) + delta.x),
                    round_i16(f64::from(point.y) + delta.y),
                    point.on_curve,
                )
            })
            .collect();

        let mut contours = Vec::with_capacity(end_pts.len());
        let mut start = 0;
        for &end in &end_pts {
            let Some(slice) = moved.get(start..=end) else {
                break;
            };
            contours.push(Contour::from(slice.to_vec()));
            start = end + 1;
        }

        let mut simple = SimpleGlyph {
            bbox: Bbox::default(),
            contours,
            instructions: glyph.instructions().to_vec(),
        };
        simple.recompute_bounding_box();
        Glyph::Simple(simple)
    }

    /// Move component offsets by their deltas.
    ///
    /// The bounding box is left as read; it is recomputed once every glyph
    /// has been instanced, see [`resolve_composite_bounds`].
    pub(crate) fn composite(&self, glyph_id: GlyphId, glyph: &ReadCompositeGlyph) -> Glyph {
        let components: Vec<_> = glyph.components().collect();
        if components.is_empty() {
            return Glyph::Empty;
        }

        // Component offsets are deltas' "points"; they are never IUP'd.
        let reference: Vec<KPoint> = components
            .iter()
            .map(|component| match component.anchor {
                Anchor::Offset { x, y } => KPoint::new(f64::from(x), f64::from(y)),
                Anchor::Point { .. } => KPoint::ORIGIN,
            })
            .collect();
        let deltas = self.accumulate(glyph_id, &reference, &[]);

        let mut new_components = components.iter().zip(&reference).zip(&deltas).map(
            |((source, offset), delta)| {
                let anchor = match source.anchor {
                    Anchor::Offset { .. } => Anchor::Offset {
                        x: round_i16(offset.x + delta.x),
                        y: round_i16(offset.y + delta.y),
                    },
                    Anchor::Point { base, component } => Anchor::Point { base, component },
                };
                Component {
                    glyph: source.glyph,
                    anchor,
                    flags: component_flags(source.flags),
                    transform: source.transform.clone(),
                }
            },
        );

        let Some(first) = new_components.next() else {
            return Glyph::Empty;
        };
        let bbox = Bbox {
            x_min: glyph.x_min(),
            y_min: glyph.y_min(),
            x_max: glyph.x_max(),
            y_max: glyph.y_max(),
        };
        let mut composite = CompositeGlyph::new(first, bbox);
        for component in new_components {
            composite.add_component(component, bbox);
        }
        Glyph::Composite(composite)
    }
}

fn component_flags(flags: CompositeGlyphFlags) -> ComponentFlags {
    ComponentFlags {
        round_xy_to_grid: flags.contains(CompositeGlyphFlags::ROUND_XY_TO_GRID),
        use_my_metrics: flags.contains(CompositeGlyphFlags::USE_MY_METRICS),
        scaled_component_offset: flags.contains(CompositeGlyphFlags::SCALED_COMPONENT_OFFSET),
        unscaled_component_offset: flags.contains(CompositeGlyphFlags::UNSCALED_COMPONENT_OFFSET),
        overlap_compound: flags.contains(CompositeGlyphFlags::OVERLAP_COMPOUND),
    }
}

fn to_vec2(point: Point<Fixed>) -> Vec2 {
    Vec2::new(point.x.to_f64(), point.y.to_f64())
}

pub(crate) fn round_i16(value: f64) -> i16 {
    value.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// Fill in deltas for points a sparse tuple left out (IUP).
///
/// Works contour by contour over the default outline `reference`. An
/// untouched point between two touched ones is interpolated when it lies
/// between them on an axis, and otherwise takes the delta of the nearer one.
/// A contour with one touched point is shifted as a whole; a contour with
/// none is left alone.
pub(crate) fn interpolate_untouched(
    deltas: &mut [Option<Vec2>],
    reference: &[KPoint],
    end_pts: &[usize],
) {
    let mut start = 0;
    for &end in end_pts {
        if end < start || end >= reference.len() {
            break;
        }
        interpolate_contour(&mut deltas[start..=end], &reference[start..=end]);
        start = end + 1;
    }
}

fn interpolate_contour(deltas: &mut [Option<Vec2>], reference: &[KPoint]) {
    let touched: Vec<usize> =
        deltas.iter().enumerate().filter_map(|(i, delta)| delta.map(|_| i)).collect();

    match touched.as_slice() {
        [] => {}
        [only] => {
            let shift = deltas[*only];
            deltas.iter_mut().for_each(|slot| *slot = shift);
        }
        _ => {
            for (i, &from) in touched.iter().enumerate() {
                let to = touched[(i + 1) % touched.len()];
                fill_gap(deltas, reference, from, to);
            }
        }
    }
}

/// Interpolate the untouched points strictly between `from` and `to`,
/// walking forward around the contour.
fn fill_gap(deltas: &mut [Option<Vec2>], reference: &[KPoint], from: usize, to: usize) {
    let (Some(d1), Some(d2)) = (deltas[from], deltas[to]) else {
        return;
    };
    let (p1, p2) = (reference[from], reference[to]);
    let len = deltas.len();

    let mut i = (from + 1) % len;
    while i != to {
        let p = reference[i];
        deltas[i] = Some(Vec2::new(
            interpolate_axis(p1.x, p2.x, p.x, d1.x, d2.x),
            interpolate_axis(p1.y, p2.y, p.y, d1.y, d2.y),
        ));
        i = (i + 1) % len;
    }
}

fn interpolate_axis(c1: f64, c2: f64, c: f64, d1: f64, d2: f64) -> f64 {
    if c1 == c2 {
        return if d1 == d2 { d1 } else { 0.0 };
    }

    let (c1, c2, d1, d2) = if c1 > c2 { (c2, c1, d2, d1) } else { (c1, c2, d1, d2) };

    if c <= c1 {
        d1
    } else if c >= c2 {
        d2
    } else {
        d1 + (c - c1) / (c2 - c1) * (d2 - d1)
    }
}

/// Recompute composite bounding boxes from their (possibly nested) components.
///
/// Returns one bbox per glyph; `None` for empty glyphs.
pub(crate) fn resolve_composite_bounds(glyphs: &mut [Glyph]) -> Vec<Option<Bbox>> {
    let mut bounds: Vec<Option<Bbox>> = glyphs
        .iter()
        .map(|glyph| match glyph {
            Glyph::Simple(simple) => Some(simple.bbox),
            Glyph::Composite(_) | Glyph::Empty => None,
        })
        .collect();
    let mut resolved: Vec<bool> =
        glyphs.iter().map(|glyph| !matches!(glyph, Glyph::Composite(_))).collect();

    // Each pass resolves at least one nesting level; stop when nothing moves.
    loop {
        let mut progressed = false;
        for gid in 0..glyphs.len() {
            if resolved[gid] {
                continue;
            }
            let Glyph::Composite(composite) = &glyphs[gid] else {
                continue;
            };
            let Some(bbox) = composite_bbox(composite, &bounds, &resolved) else {
                continue;
            };
            if let Glyph::Composite(composite) = &mut glyphs[gid] {
                composite.bbox = bbox;
            }
            bounds[gid] = Some(bbox);
            resolved[gid] = true;
            progressed = true;
        }
        if !progressed {
            break;
        }
    }

    bounds
}

/// Union of the transformed component boxes, or `None` while a component is
/// still unresolved.
fn composite_bbox(composite: &CompositeGlyph, bounds: &[Option<Bbox>], resolved: &[bool]) -> Option<Bbox> {
    let mut union: Option<kurbo::Rect> = None;

    for component in composite.components() {
        let gid = component.glyph.to_u32() as usize;
        if !*resolved.get(gid)? {
            return None;
        }
        let Some(bbox) = bounds[gid] else {
            continue;
        };

        let (dx, dy) = match component.anchor {
            Anchor::Offset { x, y } => (f64::from(x), f64::from(y)),
            Anchor::Point { .. } => (0.0, 0.0),
        };
        let t = &component.transform;
        let affine = kurbo::Affine::new([
            f64::from(t.xx.to_f32()),
            f64::from(t.yx.to_f32()),
            f64::from(t.xy.to_f32()),
            f64::from(t.yy.to_f32()),
            dx,
            dy,
        ]);
        let rect = kurbo::Rect::new(
            f64::from(bbox.x_min),
            f64::from(bbox.y_min),
            f64::from(bbox.x_max),
            f64::from(bbox.y_max),
        );
        let placed = affine.transform_rect_bbox(rect);
        union = Some(union.map_or(placed, |acc| acc.union(placed)));
    }

    let rect = union.unwrap_or(kurbo::Rect::ZERO);
    Some(Bbox {
        x_min: round_i16(rect.x0),
        y_min: round_i16(rect.y0),
        x_max: round_i16(rect.x1),
        y_max: round_i16(rect.y1),
    })
}
