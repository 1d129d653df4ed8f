//! Axis bounds and request validation.

use std::path::PathBuf;

use font_instancer::AxisSetting;
use log::debug;
use read_fonts::types::Tag;

use crate::error::{Error, Result};

/// Bounds and default of one supported design axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSpec {
    pub tag: Tag,
    /// Capitalised axis name used in messages.
    pub label: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl AxisSpec {
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn check(&self, value: Option<i32>) -> Result<Option<(Tag, i32)>> {
        match value {
            Some(value) if !self.contains(value) => Err(Error::InvalidAxisRange {
                axis: self.label,
                min: self.min,
                max: self.max,
            }),
            value => Ok(value.map(|value| (self.tag, value))),
        }
    }
}

/// Immutable bounds for every axis an instance can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSpecTable {
    pub weight: AxisSpec,
    pub width: AxisSpec,
}

/// What the user asked for, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRequest {
    pub weight: Option<i32>,
    pub width: Option<i32>,
    pub path: PathBuf,
}

impl InstanceRequest {
    pub fn new(weight: Option<i32>, width: Option<i32>, path: impl Into<PathBuf>) -> Self {
        Self { weight, width, path: path.into() }
    }
}

/// Validated axis values: weight first, then width, absent axes omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLocation(pub(crate) Vec<(Tag, i32)>);

impl AxisLocation {
    pub fn iter(&self) -> impl Iterator<Item = &(Tag, i32)> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[(Tag, i32)] {
        &self.0
    }

    /// Settings in the form the instancer takes.
    pub fn settings(&self) -> Vec<AxisSetting> {
        self.0.iter().map(|&(tag, value)| AxisSetting::new(tag, value as f32)).collect()
    }
}

impl AxisSpecTable {
    /// Check a request against the table and the filesystem.
    ///
    /// Weight is checked before width, and both before the path, so the
    /// first failing rule decides the error.
    pub fn validate(&self, request: &InstanceRequest) -> Result<AxisLocation> {
        let weight = self.weight.check(request.weight)?;
        let width = self.width.check(request.width)?;

        if !request.path.is_file() {
            return Err(Error::InvalidInputPath { path: request.path.clone() });
        }

        let location = AxisLocation(weight.into_iter().chain(width).collect());
        debug!("validated location: {location:?}");
        Ok(location)
    }
}
