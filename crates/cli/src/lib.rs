//! vf2s: static instances of variable fonts with unique names.
//!
//! A run validates the requested axis values, instantiates the font at that
//! location, rewrites its family, full and PostScript names with a token
//! derived from the location (e.g. `wg700wd100`), restores the
//! OVERLAP_SIMPLE hint and writes the result next to the source font.

pub mod axis;
pub mod cli;
pub mod config;
pub mod error;
pub mod font_io;
pub mod naming;
pub mod output;
pub mod overlap;
pub mod pipeline;
pub mod token;

pub use axis::{AxisLocation, AxisSpec, AxisSpecTable, InstanceRequest};
pub use error::{Error, Result};
pub use font_io::{Font, FontIo, FontationsIo};
pub use naming::InstanceNames;
pub use output::OutputDescriptor;
pub use overlap::patch_overlap_flags;
pub use pipeline::run;
pub use token::Token;
