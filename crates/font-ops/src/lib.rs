//! Table-level font rewriting helpers.
//!
//! Everything here works on complete font binaries: read with `read-fonts`,
//! re-serialized with `write-fonts`' [`FontBuilder`].

mod error;
mod glyphs;
mod names;

pub use error::{Error, Result};
pub use glyphs::{GlyphEntry, OVERLAP_SIMPLE, glyph_entries, set_overlap_simple};
pub use names::{NameEntry, name_records, rename};

use read_fonts::FontRef;
use write_fonts::FontBuilder;

/// Rewrite font data by applying a transformation function.
///
/// Copies all tables from the source font, then calls `f` to modify or add
/// tables. A table added by `f` replaces the copied one with the same tag.
pub fn rewrite_font(
    data: &[u8],
    f: impl FnOnce(&FontRef, &mut FontBuilder) -> Result<()>,
) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    f(&font, &mut builder)?;
    Ok(builder.build())
}
