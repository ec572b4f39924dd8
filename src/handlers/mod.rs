pub mod auth;
pub mod cities;
pub mod specialists;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn main() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": "RuralCare",
        "tagline": "Villages to the World: Your Health, Our Priority"
    }))
}

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "cities_loaded": state.gazetteer.len(),
        "city_data_available": state.gazetteer.is_available()
    }))
}
