use crate::models::CandidateRecord;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Read-only source of candidate restaurants for one locale
pub trait DatasetProvider: Send + Sync {
    fn locale(&self) -> &str;

    /// Candidates in their canonical order
    fn records(&self) -> &[CandidateRecord];
}

/// Dataset held entirely in memory
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    locale: String,
    records: Vec<CandidateRecord>,
}

impl InMemoryDataset {
    pub fn from_records(locale: impl Into<String>, records: Vec<CandidateRecord>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| CandidateRecord { position, ..record })
            .collect();

        Self {
            locale: locale.into(),
            records,
        }
    }

    /// Parse a JSON array of records
    pub fn from_json_str(locale: impl Into<String>, json: &str) -> Result<Self, DatasetError> {
        let records: Vec<CandidateRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(locale, records))
    }

    pub fn from_json_file<P: AsRef<Path>>(
        locale: impl Into<String>,
        path: P,
    ) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(locale, &json)
    }

    /// Built-in sample set for Prague, distances in miles from the Old Town Square
    pub fn prague() -> Self {
        Self::from_records(
            "prague",
            vec![
                CandidateRecord::new("Lokál Dlouhá", 0.4, "outdoor seating", "czech"),
                CandidateRecord::new("U Fleků", 1.1, "beer garden", "czech"),
                CandidateRecord::new("Kampa Park", 0.9, "river view", "seafood"),
                CandidateRecord::new("Café Savoy", 1.3, "wifi", "cafe"),
                CandidateRecord::new("Pizza Nuova", 0.7, "kids menu", "italian"),
                CandidateRecord::new("Thai Orchid", 2.2, "wifi", "thai"),
                CandidateRecord::new("Lehká Hlava", 0.5, "vegan options", "vegetarian"),
                CandidateRecord::new("Field", 0.6, "none", "european"),
                CandidateRecord::new("Sansho", 1.8, "wheelchair access", "asian"),
                CandidateRecord::new("Eska", 2.9, "parking", "czech"),
            ],
        )
    }
}

impl DatasetProvider for InMemoryDataset {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn records(&self) -> &[CandidateRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keep_position() {
        let dataset = InMemoryDataset::prague();

        assert_eq!(dataset.locale(), "prague");
        for (i, record) in dataset.records().iter().enumerate() {
            assert_eq!(record.position, i);
        }
    }

    #[test]
    fn test_json_with_missing_field_still_loads() {
        let json = r#"[
            {"name": "A", "distance": 1.0, "additional_amenities": "wifi", "cuisine_type": "italian"},
            {"name": "B", "additional_amenities": "none", "cuisine_type": "thai"}
        ]"#;

        let dataset = InMemoryDataset::from_json_str("test", json).unwrap();

        assert_eq!(dataset.records().len(), 2);
        assert_eq!(dataset.records()[1].distance, None);
        assert_eq!(dataset.records()[1].position, 1);
    }

    #[test]
    fn test_json_with_wrong_typed_field_still_loads() {
        let json = r#"[
            {"name": "A", "distance": 1.0, "additional_amenities": "wifi", "cuisine_type": "italian"},
            {"name": "B", "distance": "far", "additional_amenities": "none", "cuisine_type": "thai"}
        ]"#;

        let dataset = InMemoryDataset::from_json_str("test", json).unwrap();

        assert_eq!(dataset.records().len(), 2);
        assert_eq!(dataset.records()[0].distance(), Ok(1.0));
        assert_eq!(
            dataset.records()[1].distance(),
            Err(crate::models::RecordError::MalformedField {
                position: 1,
                field: "distance"
            })
        );
    }

    #[test]
    fn test_json_file() {
        let path = std::env::temp_dir().join(format!("dataset-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"name": "A", "distance": 1.0, "additional_amenities": "wifi", "cuisine_type": "italian"}]"#,
        )
        .unwrap();

        let dataset = InMemoryDataset::from_json_file("file", &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(dataset.records().len(), 1);
        assert!(InMemoryDataset::from_json_file("file", &path).is_err());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            InMemoryDataset::from_json_str("bad", "{not json"),
            Err(DatasetError::Format(_))
        ));
    }
}
