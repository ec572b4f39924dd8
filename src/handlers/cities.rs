use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::models::CityQuery;
use crate::state::AppState;

pub async fn validate_city(
    query: web::Query<CityQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "city": query.name.trim(),
        "valid": state.gazetteer.is_valid_city(&query.name),
    }))
}

pub async fn city_coordinates(
    query: web::Query<CityQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match state.gazetteer.coordinates_of(&query.name) {
        Some(c) => HttpResponse::Ok().json(json!({
            "city": query.name.trim(),
            "latitude": c.latitude,
            "longitude": c.longitude,
        })),
        None => HttpResponse::NotFound().json(json!({
            "error": "City not found. Please enter a valid city."
        })),
    }
}
