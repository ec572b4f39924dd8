//! Immutable city lookup loaded once from a CSV dataset.
//!
//! The dataset needs `city`, latitude (`latitude`/`lat`) and longitude
//! (`longitude`/`lng`/`lon`) columns; any other columns
//! are ignored. A dataset that cannot be read leaves the gazetteer
//! *unavailable*: every city is reported invalid and `lookup` answers with
//! `DataUnavailable` so callers can tell "no such city" from "no data".

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::AppError;
use crate::models::{CityRecord, Coordinates};

#[derive(Debug, Default)]
pub struct Gazetteer {
    records: Vec<CityRecord>,
    /// normalized name -> index of the first record with that name
    index: HashMap<String, usize>,
    unavailable: Option<String>,
}

const LATITUDE_HEADERS: [&str; 2] = ["latitude", "lat"];
const LONGITUDE_HEADERS: [&str; 3] = ["longitude", "lng", "lon"];

/// Trims and lowercases a city name.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Gazetteer {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| AppError::DataUnavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(file)
    }

    /// Like [`Gazetteer::load`], but degrades to an unavailable gazetteer
    /// instead of failing.
    pub fn load_or_unavailable(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(gazetteer) => gazetteer,
            Err(AppError::DataUnavailable(reason)) => {
                log::warn!("City dataset unavailable, every city will be rejected: {}", reason);
                Self::unavailable(reason)
            }
            Err(e) => {
                log::warn!("City dataset unavailable, every city will be rejected: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| AppError::DataUnavailable(e.to_string()))?;
        let has = |names: &[&str]| headers.iter().any(|h| names.contains(&h));
        if !has(&["city"]) {
            return Err(AppError::DataUnavailable(
                "dataset has no 'city' column".to_string(),
            ));
        }
        if !has(&LATITUDE_HEADERS) || !has(&LONGITUDE_HEADERS) {
            return Err(AppError::DataUnavailable(
                "dataset has no latitude/longitude columns".to_string(),
            ));
        }

        let mut gazetteer = Self::default();
        for (i, row) in rdr.deserialize::<CityRecord>().enumerate() {
            match row {
                Ok(record) if !record.latitude.is_finite() || !record.longitude.is_finite() => {
                    log::warn!("Skipping city row {} with non-finite coordinates", i + 2);
                }
                Ok(record) => gazetteer.insert(record),
                // row 1 is the header
                Err(e) => log::warn!("Skipping malformed city row {}: {}", i + 2, e),
            }
        }
        Ok(gazetteer)
    }

    fn insert(&mut self, record: CityRecord) {
        let key = normalize(&record.name);
        if key.is_empty() {
            return;
        }
        let next = self.records.len();
        // first match wins for duplicate names
        if let std::collections::hash_map::Entry::Vacant(slot) = self.index.entry(key) {
            slot.insert(next);
            self.records.push(record);
        }
    }

    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_valid_city(&self, name: &str) -> bool {
        self.index.contains_key(&normalize(name))
    }

    pub fn coordinates_of(&self, name: &str) -> Option<Coordinates> {
        self.find(name).map(CityRecord::coordinates)
    }

    fn find(&self, name: &str) -> Option<&CityRecord> {
        self.index
            .get(&normalize(name))
            .and_then(|&i| self.records.get(i))
    }

    /// Validate-and-locate in one step.
    pub fn lookup(&self, name: &str) -> Result<&CityRecord, AppError> {
        if let Some(reason) = &self.unavailable {
            return Err(AppError::DataUnavailable(reason.clone()));
        }
        self.find(name)
            .ok_or_else(|| AppError::CityNotFound(name.trim().to_string()))
    }
}
