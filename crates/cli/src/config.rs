//! Configuration constants for vf2s instances.

use read_fonts::types::Tag;

use crate::axis::{AxisSpec, AxisSpecTable};

/// Family name written into every instance.
pub const FONT_NAME: &str = "Open Sans";

/// The only style vf2s produces.
pub const STYLE_NAME: &str = "Regular";

/// Version reported by `--version`.
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Output file extension, without the dot.
pub const OUTPUT_EXTENSION: &str = "ttf";

pub const WEIGHT: AxisSpec =
    AxisSpec { tag: Tag::new(b"wght"), label: "Weight", min: 300, max: 800, default: 400 };

pub const WIDTH: AxisSpec =
    AxisSpec { tag: Tag::new(b"wdth"), label: "Width", min: 60, max: 100, default: 100 };

/// Supported axes and their bounds.
pub const AXIS_SPECS: AxisSpecTable = AxisSpecTable { weight: WEIGHT, width: WIDTH };
