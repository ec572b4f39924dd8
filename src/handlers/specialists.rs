use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

use crate::error::AppError;
use crate::models::{ResetRequest, SearchRequest, SelectRequest, SpecialistCategory};
use crate::state::AppState;

pub async fn get_categories() -> HttpResponse {
    let categories: Vec<_> = SpecialistCategory::ALL
        .iter()
        .map(|c| json!({ "id": c, "name": c.display_name() }))
        .collect();

    HttpResponse::Ok().json(json!({
        "categories": categories
    }))
}

pub async fn search(
    data: web::Json<SearchRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let req = data.into_inner();

    match state.search_specialists(&req.user_id, &req.city) {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(AppError::CityNotFound(city)) => HttpResponse::NotFound().json(json!({
            "error": "City not found. Please enter a valid city.",
            "city": city,
            "state": "awaiting_city_input",
        })),
        Err(e) => e.error_response(),
    }
}

pub async fn select(
    data: web::Json<SelectRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let req = data.into_inner();

    let category = match req.category.parse::<SpecialistCategory>() {
        Ok(c) => c,
        Err(msg) => return HttpResponse::BadRequest().json(json!({ "error": msg })),
    };

    match state.select_specialist(&req.user_id, category) {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => e.error_response(),
    }
}

pub async fn reset(
    data: web::Json<ResetRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.reset_search(&data.user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, TEST_BCRYPT_COST};
    use crate::handlers::cities;
    use crate::services::accounts::AccountStore;
    use crate::services::gazetteer::Gazetteer;
    use crate::services::locator::JITTER_DEGREES;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use tempfile::tempdir;

    async fn app_state(dir: &tempfile::TempDir, gazetteer: Gazetteer) -> web::Data<AppState> {
        let accounts = AccountStore::new(test_pool(dir).await, TEST_BCRYPT_COST);
        web::Data::new(AppState::new(accounts, gazetteer, 5))
    }

    fn paris() -> Gazetteer {
        Gazetteer::from_reader("city,latitude,longitude\nParis,48.8566,2.3522\n".as_bytes()).unwrap()
    }

    #[actix_web::test]
    async fn search_select_and_retry() {
        let dir = tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(app_state(&dir, paris()).await)
                .route("/api/specialists/search", web::post().to(search))
                .route("/api/specialists/select", web::post().to(select))
                .route("/api/specialists/reset", web::post().to(reset)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/specialists/search")
            .set_json(json!({"user_id": "u1", "city": "paris"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["state"], "showing_specialist_options");
        assert_eq!(body["city"], "Paris");
        let markers = body["markers"].as_array().unwrap();
        assert_eq!(markers.len(), 5);
        for m in markers {
            let lat = m["latitude"].as_f64().unwrap();
            let lon = m["longitude"].as_f64().unwrap();
            assert!((lat - 48.8566).abs() < JITTER_DEGREES);
            assert!((lon - 2.3522).abs() < JITTER_DEGREES);
        }

        let req = test::TestRequest::post()
            .uri("/api/specialists/select")
            .set_json(json!({"user_id": "u1", "category": "Cardiologist"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["state"], "markers_displayed");
        assert_eq!(body["category"], "cardiologist");
        assert_eq!(body["markers"].as_array().unwrap().len(), 5);

        let req = test::TestRequest::post()
            .uri("/api/specialists/search")
            .set_json(json!({"user_id": "u1", "city": "Atlantis"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["state"], "awaiting_city_input");

        // nothing to select after a failed search
        let req = test::TestRequest::post()
            .uri("/api/specialists/select")
            .set_json(json!({"user_id": "u1", "category": "psychiatrist"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/specialists/select")
            .set_json(json!({"user_id": "u1", "category": "dentist"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/specialists/reset")
            .set_json(json!({"user_id": "u1"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["state"], "awaiting_city_input");
    }

    #[actix_web::test]
    async fn missing_dataset_is_service_unavailable() {
        let dir = tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(app_state(&dir, Gazetteer::unavailable("missing")).await)
                .route("/api/specialists/search", web::post().to(search))
                .route("/api/cities/validate", web::get().to(cities::validate_city)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/specialists/search")
            .set_json(json!({"user_id": "u1", "city": "Paris"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::get()
            .uri("/api/cities/validate?name=Paris")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], false);
    }

    #[actix_web::test]
    async fn city_endpoints() {
        let dir = tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(app_state(&dir, paris()).await)
                .route("/api/cities/validate", web::get().to(cities::validate_city))
                .route("/api/cities/coordinates", web::get().to(cities::city_coordinates))
                .route("/api/specialists/categories", web::get().to(get_categories)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/cities/validate?name=%20%20paris%20")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);

        let req = test::TestRequest::get()
            .uri("/api/cities/coordinates?name=Paris")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["latitude"], 48.8566);
        assert_eq!(body["longitude"], 2.3522);

        let req = test::TestRequest::get()
            .uri("/api/cities/coordinates?name=Atlantis")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/specialists/categories")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0]["name"], "General Practitioner");
    }
}
