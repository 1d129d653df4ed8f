//! Loading, instancing and saving fonts.
//!
//! [`FontIo`] is the seam between the instance pipeline and whatever reads,
//! interpolates and writes font binaries. [`FontationsIo`] is the real
//! implementation; tests substitute their own.

use std::{
    fs::{read, write},
    io,
    path::{Path, PathBuf},
};

use font_instancer::instantiate;
use log::debug;
use read_fonts::FontRef;
use vf2s_font_ops::{GlyphEntry, NameEntry, glyph_entries, name_records};

use crate::{
    axis::AxisLocation,
    error::{Error, Result},
};

/// An in-memory font binary and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    path: PathBuf,
    data: Vec<u8>,
}

impl Font {
    /// Wrap font data, checking that it parses as OpenType.
    pub fn from_data(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self> {
        let path = path.into();
        if let Err(e) = FontRef::new(&data) {
            return Err(Error::FontLoad { path, cause: e.into() });
        }
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn name_records(&self) -> Result<Vec<NameEntry>> {
        Ok(name_records(&self.data)?)
    }

    pub fn glyph_entries(&self) -> Result<Vec<GlyphEntry>> {
        Ok(glyph_entries(&self.data)?)
    }

    /// Replace the font data with `f`'s output.
    pub(crate) fn transform(
        &mut self,
        f: impl FnOnce(&[u8]) -> vf2s_font_ops::Result<Vec<u8>>,
    ) -> Result<()> {
        self.data = f(&self.data)?;
        Ok(())
    }
}

/// Font reading, variable font instancing and font writing.
pub trait FontIo {
    /// Read and parse the font at `path`.
    fn load(&self, path: &Path) -> Result<Font>;

    /// Produce a static font at `location`.
    fn instantiate(&self, font: &Font, location: &AxisLocation) -> Result<Font>;

    /// Write `font` to `path`, replacing any existing file.
    fn save(&self, font: &Font, path: &Path) -> io::Result<()>;
}

/// [`FontIo`] backed by the filesystem and the fontations crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontationsIo;

impl FontIo for FontationsIo {
    fn load(&self, path: &Path) -> Result<Font> {
        let data =
            read(path).map_err(|e| Error::FontLoad { path: path.to_owned(), cause: e.into() })?;
        debug!("read {} bytes from {}", data.len(), path.display());
        Font::from_data(path, data)
    }

    fn instantiate(&self, font: &Font, location: &AxisLocation) -> Result<Font> {
        let data = instantiate(font.data(), &location.settings()).map_err(|cause| {
            Error::Instantiation { path: font.path().to_owned(), cause }
        })?;
        Font::from_data(font.path(), data)
    }

    fn save(&self, font: &Font, path: &Path) -> io::Result<()> {
        write(path, font.data())
    }
}
