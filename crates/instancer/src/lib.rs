//! # vf2s instancer
//!
//! Turn a TrueType variable font into a static instance at a fixed axis
//! location.
//!
//! ## Example
//!
//! ```no_run
//! use font_instancer::{AxisSetting, instantiate};
//!
//! let vf_data = std::fs::read("OpenSans-VF.ttf").unwrap();
//! let location = [AxisSetting::from((b"wght", 700.0)), AxisSetting::from((b"wdth", 100.0))];
//! let static_font = instantiate(&vf_data, &location).unwrap();
//! std::fs::write("OpenSans-Bold.ttf", static_font).unwrap();
//! ```
//!
//! Only `glyf` outlines are supported. The output drops every variation
//! table, and `head`, `hhea`, `hmtx`, `OS/2` and `post` are recomputed for
//! the chosen location.

mod error;
mod glyphs;
mod instancer;
mod location;
mod metrics;

pub use error::{Error, Result};
pub use instancer::instantiate;
use read_fonts::types::Tag;

/// A user-space axis value, e.g. `wght=700`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSetting {
    pub tag: Tag,
    pub value: f32,
}

impl AxisSetting {
    pub fn new(tag: Tag, value: f32) -> Self {
        Self { tag, value }
    }
}

impl From<(Tag, f32)> for AxisSetting {
    fn from((tag, value): (Tag, f32)) -> Self {
        Self::new(tag, value)
    }
}

impl From<(&[u8; 4], f32)> for AxisSetting {
    fn from((tag, value): (&[u8; 4], f32)) -> Self {
        Self::new(Tag::new(tag), value)
    }
}
