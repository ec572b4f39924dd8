use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{SearchResponse, SpecialistCategory, User};
use crate::services::accounts::AccountStore;
use crate::services::gazetteer::Gazetteer;
use crate::services::search::{CitySearch, SearchState};

pub type UserId = String;
pub type CitySearches = Arc<Mutex<HashMap<UserId, CitySearch>>>;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountStore,
    pub gazetteer: Arc<Gazetteer>,
    pub searches: CitySearches,
    pub specialist_count: usize,
}

impl AppState {
    pub fn new(accounts: AccountStore, gazetteer: Gazetteer, specialist_count: usize) -> Self {
        Self {
            accounts,
            gazetteer: Arc::new(gazetteer),
            searches: Arc::new(Mutex::new(HashMap::new())),
            specialist_count,
        }
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AppError> {
        self.accounts.create_account(name, email, password).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        self.accounts.authenticate(email, password).await
    }

    /// Runs the city search machine for `user_id`. On failure the machine is
    /// back in `AwaitingCityInput`, which is the same as having no entry.
    pub fn search_specialists(&self, user_id: &str, city: &str) -> Result<SearchResponse, AppError> {
        let mut searches = self.searches.lock().unwrap_or_else(|e| e.into_inner());
        let search = searches.entry(user_id.to_string()).or_insert_with(CitySearch::new);
        let result = search
            .submit_city(city, &self.gazetteer, self.specialist_count, &mut rand::rng())
            .map(SearchResponse::from);
        if result.is_err() {
            searches.remove(user_id);
        }
        result
    }

    pub fn select_specialist(
        &self,
        user_id: &str,
        category: SpecialistCategory,
    ) -> Result<SearchResponse, AppError> {
        let mut searches = self.searches.lock().unwrap_or_else(|e| e.into_inner());
        let search = searches.get_mut(user_id).ok_or_else(|| {
            AppError::InvalidSelection("no city search in progress".to_string())
        })?;
        let state = search.select_category(category)?;
        Ok(SearchResponse::from(state))
    }

    /// Drops the user's machine; an absent entry reads as `AwaitingCityInput`.
    pub fn reset_search(&self, user_id: &str) -> SearchResponse {
        let mut searches = self.searches.lock().unwrap_or_else(|e| e.into_inner());
        searches.remove(user_id);
        SearchResponse::from(&SearchState::AwaitingCityInput)
    }
}
