use std::{
    borrow::Cow,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors that end a vf2s run. `Display` is the exact stderr line.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{axis} axis value must be in the range {min} - {max}")]
    InvalidAxisRange { axis: &'static str, min: i32, max: i32 },

    #[error("{} does not appear to be a valid path to a variable font", path.display())]
    InvalidInputPath { path: PathBuf },

    #[error("Failed to read font file {} with error: {cause}", path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to instantiate {} with error: {cause}", path.display())]
    Instantiation {
        path: PathBuf,
        #[source]
        cause: font_instancer::Error,
    },

    #[error("Failed to rewrite font tables with error: {0}")]
    Rewrite(#[from] vf2s_font_ops::Error),

    /// Carries the full path; the message names only the file.
    #[error("Failed to write font file {} with error: {cause}", file_name(path))]
    FontWrite {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name().unwrap_or(path.as_os_str()).to_string_lossy()
}
