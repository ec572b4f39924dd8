use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

use crate::models::{AuthRequest, EmailQuery, UserResponse};
use crate::state::AppState;

pub async fn signup(
    data: web::Json<AuthRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let auth_req = data.into_inner();
    let name = auth_req.name.unwrap_or_default();

    match state.signup(name.trim(), &auth_req.email, &auth_req.password).await {
        Ok(user) => {
            log::info!("Sign up successful for user {}", user.id);
            HttpResponse::Created().json(json!({
                "message": format!("Welcome {} to RuralCare", user.name),
                "user": UserResponse::from(user),
            }))
        }
        Err(e) => {
            log::info!("Sign up rejected: {}", e);
            e.error_response()
        }
    }
}

pub async fn login(
    data: web::Json<AuthRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let auth_req = data.into_inner();

    match state.login(&auth_req.email, &auth_req.password).await {
        Ok(user) => {
            log::info!("Login successful for user {}", user.id);
            HttpResponse::Ok().json(json!({
                "message": format!("Welcome {} to RuralCare", user.name),
                "user": UserResponse::from(user),
            }))
        }
        Err(e) => {
            log::info!("Login rejected: {}", e);
            e.error_response()
        }
    }
}

pub async fn email_exists(
    query: web::Query<EmailQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match state.accounts.email_exists(&query.email).await {
        Ok(exists) => HttpResponse::Ok().json(json!({ "exists": exists })),
        Err(e) => e.error_response(),
    }
}
