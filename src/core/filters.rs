use crate::models::{CandidateRecord, RecordError, RestaurantRequest};

/// Filter values that mean "no filter supplied", compared case-insensitively
pub const EMPTY_MARKERS: [&str; 5] = ["undefined", "unknown", "none", "null", ""];

/// A normalized amenity or cuisine filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Any,
    /// Lowercased value a record must equal
    Exact(String),
}

impl FilterValue {
    /// Normalize an optional filter field.
    ///
    /// `None` is treated as the empty string, and every empty marker collapses
    /// to `Any`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let lowered = raw.unwrap_or("").to_lowercase();
        if EMPTY_MARKERS.contains(&lowered.as_str()) {
            FilterValue::Any
        } else {
            FilterValue::Exact(lowered)
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FilterValue::Any)
    }

    #[inline]
    pub fn admits(&self, value: &str) -> bool {
        match self {
            FilterValue::Any => true,
            FilterValue::Exact(expected) => value.to_lowercase() == *expected,
        }
    }
}

/// All criteria applied to one request
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// `None` when the radius is zero or absent
    pub miles_radius: Option<f64>,
    pub amenity: FilterValue,
    pub cuisine: FilterValue,
}

impl FilterCriteria {
    pub fn new(miles_radius: f64, amenity: Option<&str>, cuisine: Option<&str>) -> Self {
        Self {
            miles_radius: (miles_radius != 0.0).then_some(miles_radius),
            amenity: FilterValue::normalize(amenity),
            cuisine: FilterValue::normalize(cuisine),
        }
    }

    pub fn from_request(request: &RestaurantRequest) -> Self {
        Self::new(
            request.miles_radius,
            request.additional_amenities.as_deref(),
            request.cuisine_type.as_deref(),
        )
    }

    /// Check one record against all three predicates.
    ///
    /// Fields are only read when their predicate is active, so a record
    /// missing `distance` is fine as long as no radius is set.
    #[inline]
    pub fn matches(&self, record: &CandidateRecord) -> Result<bool, RecordError> {
        if let Some(radius) = self.miles_radius {
            // false for a NaN radius, which therefore rejects every record
            let within = record.distance()? <= radius;
            if !within {
                return Ok(false);
            }
        }

        if !self.amenity.is_any() && !self.amenity.admits(record.additional_amenities()?) {
            return Ok(false);
        }

        if !self.cuisine.is_any() && !self.cuisine.admits(record.cuisine_type()?) {
            return Ok(false);
        }

        Ok(true)
    }
}

/// Keep the records satisfying `criteria`, in dataset order
pub fn filter_restaurants<'a>(
    records: &'a [CandidateRecord],
    criteria: &FilterCriteria,
) -> Result<Vec<&'a CandidateRecord>, RecordError> {
    let mut filtered = Vec::new();
    for record in records {
        if criteria.matches(record)? {
            filtered.push(record);
        }
    }
    Ok(filtered)
}
