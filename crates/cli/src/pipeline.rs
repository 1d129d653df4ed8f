//! The instance pipeline: validate, load, instantiate, rename, patch, save.

use std::path::PathBuf;

use log::debug;

use crate::{
    axis::{AxisSpecTable, InstanceRequest},
    config::FONT_NAME,
    error::{Error, Result},
    font_io::FontIo,
    naming::InstanceNames,
    output::OutputDescriptor,
    overlap::patch_overlap_flags,
    token::Token,
};

/// Produce one static instance and return the path it was written to.
///
/// Nothing is loaded, changed or written unless `request` passes
/// validation against `specs`.
pub fn run(specs: &AxisSpecTable, request: &InstanceRequest, io: &impl FontIo) -> Result<PathBuf> {
    let location = specs.validate(request)?;
    let token = Token::from_location(&location);
    debug!("instance token: {token}");

    let source = io.load(&request.path)?;
    let mut font = io.instantiate(&source, &location)?;
    drop(source);

    InstanceNames::new(FONT_NAME, &token).apply(&mut font)?;
    patch_overlap_flags(&mut font)?;

    let output = OutputDescriptor::resolve(&request.path, &token)
        .map_err(|_| Error::InvalidInputPath { path: request.path.clone() })?
        .into_path();
    debug!("writing {}", output.display());

    match io.save(&font, &output) {
        Ok(()) => Ok(output),
        Err(cause) => Err(Error::FontWrite { path: output, cause }),
    }
}
