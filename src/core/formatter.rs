use crate::models::{CandidateRecord, RecordError, RestaurantOption};

/// Render a distance the way the option text has always shown it.
///
/// Whole numbers keep a fractional digit ("1.0"). Magnitudes below 1e-4 or
/// from 1e16 up switch to exponent form with an explicit sign and at least
/// two exponent digits ("1e+16", "1e-05"). Non-finite values read "inf",
/// "-inf" and "nan".
pub fn format_distance(distance: f64) -> String {
    if distance.is_nan() {
        return "nan".to_string();
    }

    // Debug already picks the shortest digits and the same cutover points
    let rendered = format!("{:?}", distance);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => rendered,
        },
        None => rendered,
    }
}

/// Build the three-line description offered for one filtered record
#[inline]
pub fn format_option(index: usize, record: &CandidateRecord) -> Result<RestaurantOption, RecordError> {
    let description = format!(
        "● This is Restaurant: {} which is located {} miles away from location\n\
         ● Additional amenity is {}\n\
         ● Cuisine type is {}",
        record.name()?,
        format_distance(record.distance()?),
        record.additional_amenities()?,
        record.cuisine_type()?,
    );

    Ok(RestaurantOption { index, description })
}
