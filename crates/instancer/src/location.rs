//! Axis setting validation and normalization.

use read_fonts::{
    tables::{avar::Avar, fvar::Fvar},
    types::{F2Dot14, Fixed},
};

use crate::{
    AxisSetting,
    error::{Error, Result},
};

/// Check every setting against the font's axes and return one normalized
/// coordinate per `fvar` axis.
///
/// Axes without a setting stay at their default (zero). A tag the font does
/// not define, or a value outside the axis' `min..=max`, is an error.
pub(crate) fn normalize(
    fvar: &Fvar,
    avar: Option<&Avar>,
    settings: &[AxisSetting],
) -> Result<Vec<F2Dot14>> {
    let axes = fvar.axis_instance_arrays()?.axes();

    for setting in settings {
        let axis = axes
            .iter()
            .find(|axis| axis.axis_tag() == setting.tag)
            .ok_or(Error::AxisNotFound(setting.tag))?;

        let min = axis.min_value().to_f64() as f32;
        let max = axis.max_value().to_f64() as f32;
        if !(min..=max).contains(&setting.value) {
            return Err(Error::AxisOutOfRange { tag: setting.tag, value: setting.value, min, max });
        }
    }

    let mut coords = vec![F2Dot14::default(); fvar.axis_count() as usize];
    let user_coords = settings
        .iter()
        .map(|setting| (setting.tag, Fixed::from_f64(f64::from(setting.value))));
    fvar.user_to_normalized(avar, user_coords, &mut coords);

    Ok(coords)
}

#[cfg(test)]
mod tests {
    use read_fonts::{FontRef, TableProvider, types::Tag};

    use super::*;

    fn normalize_vazirmatn(settings: &[AxisSetting]) -> Result<Vec<F2Dot14>> {
        let font = FontRef::new(font_test_data::VAZIRMATN_VAR).unwrap();
        let fvar = font.fvar().unwrap();
        let avar = font.avar().ok();
        normalize(&fvar, avar.as_ref(), settings)
    }

    #[test]
    fn default_location_is_zero() {
        let coords = normalize_vazirmatn(&[]).unwrap();
        assert_eq!(coords, vec![F2Dot14::default()]);

        let coords = normalize_vazirmatn(&[AxisSetting::from((b"wght", 400.0))]).unwrap();
        assert_eq!(coords, vec![F2Dot14::default()]);
    }

    #[test]
    fn extremes_map_to_unit_range() {
        let max = normalize_vazirmatn(&[AxisSetting::from((b"wght", 900.0))]).unwrap();
        assert_eq!(max[0].to_f32(), 1.0);

        let min = normalize_vazirmatn(&[AxisSetting::from((b"wght", 100.0))]).unwrap();
        assert_eq!(min[0].to_f32(), -1.0);
    }

    #[test]
    fn rejects_unknown_axis() {
        let result = normalize_vazirmatn(&[AxisSetting::from((b"wdth", 100.0))]);
        assert!(matches!(result, Err(Error::AxisNotFound(tag)) if tag == Tag::new(b"wdth")));
    }

    #[test]
    fn rejects_value_outside_font_range() {
        let result = normalize_vazirmatn(&[AxisSetting::from((b"wght", 950.0))]);
        assert!(matches!(
            result,
            Err(Error::AxisOutOfRange { value, min, max, .. })
                if value == 950.0 && min == 100.0 && max == 900.0
        ));
    }
}
