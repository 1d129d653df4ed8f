//! Restoring the OVERLAP_SIMPLE hint after instancing.

use log::info;
use vf2s_font_ops::set_overlap_simple;

use crate::{error::Result, font_io::Font};

/// Set OVERLAP_SIMPLE on every glyph with contours.
///
/// Instancing rebuilds `glyf` without the hint, and some renderers need it
/// to fill overlapping contours correctly. Returns the number of glyphs
/// patched.
pub fn patch_overlap_flags(font: &mut Font) -> Result<usize> {
    let mut patched = 0;
    font.transform(|data| {
        let (data, count) = set_overlap_simple(data)?;
        patched = count;
        Ok(data)
    })?;
    info!("set OVERLAP_SIMPLE on {patched} glyphs");
    Ok(patched)
}
