//! Output file placement.

use std::{
    io,
    path::{Component, Path, PathBuf, absolute},
};

use crate::{
    config::{FONT_NAME, OUTPUT_EXTENSION, STYLE_NAME},
    token::Token,
};

/// Where an instance is written: next to its source, named after its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    pub directory: PathBuf,
    pub base_name: String,
    pub extension: &'static str,
}

impl OutputDescriptor {
    /// Resolve against the absolute directory of `input`. A relative input is
    /// taken relative to the current directory, and `.`/`..` are folded away
    /// without touching the filesystem.
    pub fn resolve(input: &Path, token: &Token) -> io::Result<Self> {
        let input = normalize(&absolute(input)?);
        let directory = input.parent().map(Path::to_path_buf).unwrap_or(input);
        Ok(Self {
            directory,
            base_name: format!("{FONT_NAME}-{token}-{STYLE_NAME}"),
            extension: OUTPUT_EXTENSION,
        })
    }

    /// Full output path. An existing file at this path is overwritten.
    pub fn into_path(self) -> PathBuf {
        self.directory.join(format!("{}.{}", self.base_name, self.extension))
    }
}

/// Lexically drop `.` and resolve `..` against the preceding component.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
