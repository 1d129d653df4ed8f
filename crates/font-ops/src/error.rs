//! Error types for table-level font rewriting.

use std::result;

use read_fonts::ReadError;
use write_fonts::BuilderError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("failed to build font: {0}")]
    Build(#[from] BuilderError),

    #[error("name record {name_id} points outside the string storage")]
    UnreadableNameRecord { name_id: u16 },

    #[error("name record {name_id} cannot be encoded for platform {platform_id} encoding {encoding_id}")]
    UnencodableName { name_id: u16, platform_id: u16, encoding_id: u16 },

    #[error("name record {name_id} does not fit the string storage")]
    NameStorageOverflow { name_id: u16 },

    #[error("name table string storage starts past the end of the table")]
    MalformedNameTable,

    #[error("glyph {glyph_id} is truncated")]
    MalformedGlyph { glyph_id: u32 },
}

pub type Result<T> = result::Result<T, Error>;
