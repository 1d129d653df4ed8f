use std::result;

use read_fonts::{ReadError, types::Tag};
use write_fonts::{BuilderError, error};

/// Error types for the instancer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("not a variable font (no fvar table)")]
    NotVariableFont,

    #[error("no glyf table (CFF/CFF2 outlines are not supported)")]
    NoGlyf,

    #[error("no gvar table")]
    NoGvar,

    #[error("axis {0} is not defined by the font")]
    AxisNotFound(Tag),

    #[error("value {value} for axis {tag} is outside the font's range {min}..{max}")]
    AxisOutOfRange { tag: Tag, value: f32, min: f32, max: f32 },

    #[error("failed to build font: {0}")]
    Build(#[from] BuilderError),

    #[error("failed to write table: {0}")]
    Write(#[from] error::Error),
}

pub type Result<T> = result::Result<T, Error>;
