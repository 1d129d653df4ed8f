//! Raw `glyf` inspection and the OVERLAP_SIMPLE patch.
//!
//! `write-fonts` does not model per-point flags beyond on/off-curve, so the
//! overlap bit is written straight into the serialized glyph data.

use log::debug;
use read_fonts::{
    FontRef, ReadError, TableProvider,
    tables::loca::Loca,
    types::{GlyphId16, Tag},
};

use crate::{
    error::{Error, Result},
    rewrite_font,
};

/// Bit 6 of a simple glyph's first point flag: contours may overlap.
pub const OVERLAP_SIMPLE: u8 = 0x40;

const GLYF: Tag = Tag::new(b"glyf");
const LOCA: Tag = Tag::new(b"loca");
const HEAD: Tag = Tag::new(b"head");
const GLYPH_HEADER_LEN: usize = 10;
/// Flag bit: the next byte is a repeat count for this flag.
const REPEAT_FLAG: u8 = 0x08;
/// Byte offset of `indexToLocFormat` in `head`.
const HEAD_LOCA_FORMAT: usize = 50;

/// Outline summary of one glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    pub name: String,
    /// Negative for composite glyphs, zero for empty ones.
    pub contour_count: i16,
    /// First point flag; only simple glyphs with contours have one.
    pub flag_byte0: Option<u8>,
}

/// Describe every glyph in `glyf`. A font without `glyf`/`loca` has none.
pub fn glyph_entries(data: &[u8]) -> Result<Vec<GlyphEntry>> {
    let font = FontRef::new(data)?;
    let (Some(glyf), Ok(loca)) = (font.table_data(GLYF), font.loca(None)) else {
        return Ok(Vec::new());
    };
    let glyf = glyf.as_bytes();
    let post = font.post().ok();

    (0..loca.len())
        .map(|index| {
            let glyph = glyph_bytes(glyf, &loca, index)?;
            let contour_count = contour_count(glyph);
            let flag_byte0 = first_flag_offset(glyph, index)?.map(|offset| glyph[offset]);
            let name = post
                .as_ref()
                .and_then(|post| {
                    let gid = GlyphId16::new(u16::try_from(index).ok()?);
                    post.glyph_name(gid).map(|name| name.to_string())
                })
                .unwrap_or_else(|| format!("gid{index}"));
            Ok(GlyphEntry { name, contour_count, flag_byte0 })
        })
        .collect()
}

/// Set [`OVERLAP_SIMPLE`] on the first point of every glyph with contours.
///
/// Empty and composite glyphs are left alone. Applying it twice is the same
/// as applying it once. Returns the new font data and the number of glyphs
/// with contours.
///
/// When the first flag starts a repeat run, the run is split so the bit
/// lands on point 0 only. A split can grow a glyph by one byte; `glyf` and
/// `loca` are then laid out again, and `head.indexToLocFormat` follows if
/// the offsets no longer fit the short format.
pub fn set_overlap_simple(data: &[u8]) -> Result<(Vec<u8>, usize)> {
    let font = FontRef::new(data)?;
    let (Some(glyf), Ok(loca)) = (font.table_data(GLYF), font.loca(None)) else {
        debug!("no glyf/loca table, nothing to patch");
        return Ok((data.to_vec(), 0));
    };
    let glyf = glyf.as_bytes();

    let mut glyphs = Vec::with_capacity(loca.len());
    let mut patched = 0;
    let mut grown = false;
    for index in 0..loca.len() {
        let mut glyph = glyph_bytes(glyf, &loca, index)?.to_vec();
        if let Some(offset) = first_flag_offset(&glyph, index)? {
            grown |= mark_first_point(&mut glyph, offset, index)?;
            patched += 1;
        }
        glyphs.push(glyph);
    }

    let output = if grown {
        let long = matches!(loca, Loca::Long(_));
        let layout = GlyfLayout::new(&glyphs, long);
        debug!("repeat runs split, glyf grew to {} bytes", layout.glyf.len());
        let head = match (layout.long, font.table_data(HEAD)) {
            (true, Some(head)) if !long => Some(long_loca_head(head.as_bytes())?),
            _ => None,
        };
        rewrite_font(data, |_, builder| {
            builder.add_raw(GLYF, layout.glyf);
            builder.add_raw(LOCA, layout.loca);
            if let Some(head) = head {
                builder.add_raw(HEAD, head);
            }
            Ok(())
        })?
    } else {
        // Same lengths everywhere: patch in place and keep loca as it is.
        let mut patched_glyf = glyf.to_vec();
        for (index, glyph) in glyphs.iter().enumerate() {
            let start = loca.get_raw(index).unwrap_or(0) as usize;
            if let Some(slot) = patched_glyf.get_mut(start..start + glyph.len()) {
                slot.copy_from_slice(glyph);
            }
        }
        rewrite_font(data, |_, builder| {
            builder.add_raw(GLYF, patched_glyf);
            Ok(())
        })?
    };
    Ok((output, patched))
}

/// Put [`OVERLAP_SIMPLE`] on the flag of point 0 only. Returns whether the
/// glyph grew.
///
/// A leading run `[f|REPEAT, n]` becomes `[f|OVERLAP, f]` for `n == 1` and
/// `[f|OVERLAP, f|REPEAT, n - 1]` otherwise.
fn mark_first_point(glyph: &mut Vec<u8>, at: usize, index: usize) -> Result<bool> {
    let flag = glyph[at];
    if flag & OVERLAP_SIMPLE != 0 || flag & REPEAT_FLAG == 0 {
        glyph[at] |= OVERLAP_SIMPLE;
        return Ok(false);
    }

    let count = *glyph.get(at + 1).ok_or(Error::MalformedGlyph { glyph_id: index as u32 })?;
    let single = (flag & !REPEAT_FLAG) | OVERLAP_SIMPLE;
    match count {
        0 => {
            glyph[at] |= OVERLAP_SIMPLE;
            Ok(false)
        }
        1 => {
            glyph[at] = single;
            glyph[at + 1] = flag & !REPEAT_FLAG;
            Ok(false)
        }
        _ => {
            glyph[at] = single;
            glyph[at + 1] = count - 1;
            glyph.insert(at + 1, flag);
            Ok(true)
        }
    }
}

/// Freshly packed `glyf` and `loca`.
struct GlyfLayout {
    glyf: Vec<u8>,
    loca: Vec<u8>,
    long: bool,
}

impl GlyfLayout {
    /// Concatenate glyphs padded to even lengths. Short offsets are kept
    /// when `long` is false and every offset still fits.
    fn new(glyphs: &[Vec<u8>], long: bool) -> Self {
        let mut glyf = Vec::new();
        let mut offsets = Vec::with_capacity(glyphs.len() + 1);
        for glyph in glyphs {
            offsets.push(glyf.len() as u32);
            glyf.extend_from_slice(glyph);
            if glyf.len() % 2 == 1 {
                glyf.push(0);
            }
        }
        offsets.push(glyf.len() as u32);

        let long = long || glyf.len() / 2 > usize::from(u16::MAX);
        let loca = if long {
            offsets.iter().flat_map(|offset| offset.to_be_bytes()).collect()
        } else {
            offsets.iter().flat_map(|offset| ((offset / 2) as u16).to_be_bytes()).collect()
        };
        Self { glyf, loca, long }
    }
}

/// `head` with `indexToLocFormat` switched to long offsets.
fn long_loca_head(head: &[u8]) -> Result<Vec<u8>> {
    let mut head = head.to_vec();
    let format = head
        .get_mut(HEAD_LOCA_FORMAT..HEAD_LOCA_FORMAT + 2)
        .ok_or(Error::Parse(ReadError::OutOfBounds))?;
    format.copy_from_slice(&1i16.to_be_bytes());
    Ok(head)
}

fn glyph_bytes<'a>(glyf: &'a [u8], loca: &Loca, index: usize) -> Result<&'a [u8]> {
    let malformed = || Error::MalformedGlyph { glyph_id: index as u32 };
    let start = loca.get_raw(index).ok_or_else(malformed)? as usize;
    let end = loca.get_raw(index + 1).ok_or_else(malformed)? as usize;
    if start == end {
        return Ok(&[]);
    }
    glyf.get(start..end).ok_or_else(malformed)
}

fn contour_count(glyph: &[u8]) -> i16 {
    match glyph {
        [hi, lo, ..] => i16::from_be_bytes([*hi, *lo]),
        _ => 0,
    }
}

/// Offset of the first point flag within a simple glyph: header,
/// `endPtsOfContours`, `instructionLength`, instructions, then flags.
fn first_flag_offset(glyph: &[u8], index: usize) -> Result<Option<usize>> {
    let contours = contour_count(glyph);
    if contours <= 0 {
        return Ok(None);
    }

    let malformed = || Error::MalformedGlyph { glyph_id: index as u32 };
    let length_at = GLYPH_HEADER_LEN + 2 * contours as usize;
    let instruction_len = match glyph.get(length_at..length_at + 2) {
        Some([hi, lo]) => u16::from_be_bytes([*hi, *lo]) as usize,
        _ => return Err(malformed()),
    };
    let flags_at = length_at + 2 + instruction_len;
    if flags_at >= glyph.len() {
        return Err(malformed());
    }
    Ok(Some(flags_at))
}
