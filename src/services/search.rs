//! City search interaction, independent of any UI.
//!
//! ```text
//! AwaitingCityInput -> Validating -> ShowingSpecialistOptions -> MarkersDisplayed
//!          ^               |
//!          +---- invalid --+
//! ```
//!
//! A new `submit_city` restarts the cycle from any state.

use rand::Rng;

use crate::error::AppError;
use crate::models::{Coordinates, SearchResponse, SpecialistCategory, SpecialistMarker};
use crate::services::gazetteer::Gazetteer;
use crate::services::locator;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    AwaitingCityInput,
    Validating { city: String },
    ShowingSpecialistOptions {
        city: String,
        center: Coordinates,
        markers: Vec<SpecialistMarker>,
    },
    MarkersDisplayed {
        city: String,
        center: Coordinates,
        category: SpecialistCategory,
        markers: Vec<SpecialistMarker>,
    },
}

impl SearchState {
    pub fn name(&self) -> &'static str {
        match self {
            SearchState::AwaitingCityInput => "awaiting_city_input",
            SearchState::Validating { .. } => "validating",
            SearchState::ShowingSpecialistOptions { .. } => "showing_specialist_options",
            SearchState::MarkersDisplayed { .. } => "markers_displayed",
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::AwaitingCityInput
    }
}

impl From<&SearchState> for SearchResponse {
    fn from(state: &SearchState) -> Self {
        let (city, center, category, markers) = match state {
            SearchState::AwaitingCityInput => (None, None, None, Vec::new()),
            SearchState::Validating { city } => (Some(city.clone()), None, None, Vec::new()),
            SearchState::ShowingSpecialistOptions { city, center, markers } => {
                (Some(city.clone()), Some(*center), None, markers.clone())
            }
            SearchState::MarkersDisplayed { city, center, category, markers } => {
                (Some(city.clone()), Some(*center), Some(*category), markers.clone())
            }
        };
        SearchResponse {
            state: state.name().to_string(),
            city,
            center,
            category,
            markers,
        }
    }
}

/// Result of a successful `search_specialists`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialistSearch {
    /// Canonical spelling from the dataset.
    pub city: String,
    pub center: Coordinates,
    pub markers: Vec<SpecialistMarker>,
}

/// Validates `city` against the gazetteer and scatters markers around it.
pub fn search_specialists<R: Rng + ?Sized>(
    gazetteer: &Gazetteer,
    city: &str,
    count: usize,
    rng: &mut R,
) -> Result<SpecialistSearch, AppError> {
    let record = gazetteer.lookup(city)?;
    let center = record.coordinates();
    Ok(SpecialistSearch {
        city: record.name.clone(),
        center,
        markers: locator::generate_nearby(center, count, rng),
    })
}

#[derive(Debug, Clone, Default)]
pub struct CitySearch {
    state: SearchState,
}

impl CitySearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn submit_city<R: Rng + ?Sized>(
        &mut self,
        input: &str,
        gazetteer: &Gazetteer,
        count: usize,
        rng: &mut R,
    ) -> Result<&SearchState, AppError> {
        let city = input.trim();
        if city.is_empty() {
            self.state = SearchState::AwaitingCityInput;
            return Err(AppError::CityNotFound(String::new()));
        }

        self.state = SearchState::Validating { city: city.to_string() };
        match search_specialists(gazetteer, city, count, rng) {
            Ok(found) => {
                self.state = SearchState::ShowingSpecialistOptions {
                    city: found.city,
                    center: found.center,
                    markers: found.markers,
                };
                Ok(&self.state)
            }
            Err(e) => {
                self.state = SearchState::AwaitingCityInput;
                Err(e)
            }
        }
    }

    /// Every generated marker stays visible whichever category is chosen.
    pub fn select_category(&mut self, category: SpecialistCategory) -> Result<&SearchState, AppError> {
        match std::mem::take(&mut self.state) {
            SearchState::ShowingSpecialistOptions { city, center, markers } => {
                self.state = SearchState::MarkersDisplayed { city, center, category, markers };
                Ok(&self.state)
            }
            other => {
                let name = other.name();
                self.state = other;
                Err(AppError::InvalidSelection(format!(
                    "cannot choose a specialist while {}",
                    name
                )))
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = SearchState::AwaitingCityInput;
    }
}
