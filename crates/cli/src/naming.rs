//! Instance naming.
//!
//! Every instance gets a family, full and PostScript name carrying its
//! token, so instances made from the same variable font never collide
//! when installed side by side.

use log::info;
use vf2s_font_ops::rename;

use crate::{config::STYLE_NAME, error::Result, font_io::Font, token::Token};

/// Family name (nameID 1).
pub const FAMILY_NAME_ID: u16 = 1;
/// Full font name (nameID 4).
pub const FULL_NAME_ID: u16 = 4;
/// PostScript name (nameID 6).
pub const POSTSCRIPT_NAME_ID: u16 = 6;

/// The three name strings of one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceNames {
    pub family: String,
    pub full: String,
    pub postscript: String,
}

impl InstanceNames {
    pub fn new(font_name: &str, token: &Token) -> Self {
        Self {
            family: format!("{font_name} {token}"),
            full: format!("{font_name} {token} {STYLE_NAME}"),
            postscript: format!("{font_name}-{token}-{STYLE_NAME}"),
        }
    }

    /// Replacement string for `name_id`, if it is one we rewrite.
    pub fn get(&self, name_id: u16) -> Option<&str> {
        match name_id {
            FAMILY_NAME_ID => Some(&self.family),
            FULL_NAME_ID => Some(&self.full),
            POSTSCRIPT_NAME_ID => Some(&self.postscript),
            _ => None,
        }
    }

    /// Overwrite nameIDs 1, 4 and 6 on every platform; leave every other
    /// record as it is.
    pub fn apply(&self, font: &mut Font) -> Result<()> {
        font.transform(|data| rename(data, |name_id, _| self.get(name_id).map(str::to_owned)))?;
        info!("renamed instance to \"{}\"", self.full);
        Ok(())
    }
}
