use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use vitals_auth::config::AuthConfig;
use vitals_models::db::connection::DbConnection;
use vitals_web::{
    ctx::{Ctx, resolver::mw_ctx_resolver},
    error::Error as WebError,
    extract::Payload,
    mw_auth::mw_require_auth,
    prelude::Result as WebResult,
    session::{
        self, LoginRequest, TokenRequest, TokenResponse, ValidateTokenResponse,
    },
    user::{self, UserResponse},
    vitals::{
        blood_pressure::{self, BloodPressureRequest, BloodPressureResponse},
        sugar_intake::{self, SugarIntakeRequest, SugarIntakeResponse},
        water_intake::{self, WaterIntakeRequest, WaterIntakeResponse},
        weight::{self, WeightRequest, WeightResponse},
    },
};

use crate::config::ServerConfig;
use crate::prelude::*;

/// Shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub connection: DbConnection,
    pub auth: AuthConfig,
}

pub async fn setup_api(state: AppState, config: &ServerConfig) -> Result<JoinHandle<Result<()>>> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });

    Ok(handle)
}

pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/weight", get(list_weights).post(create_weight))
        .route(
            "/users/{user_id}/weight/{id}",
            put(update_weight).delete(delete_weight),
        )
        .route(
            "/users/{user_id}/blood-pressure",
            get(list_blood_pressures).post(create_blood_pressure),
        )
        .route(
            "/users/{user_id}/blood-pressure/{id}",
            put(update_blood_pressure).delete(delete_blood_pressure),
        )
        .route(
            "/users/{user_id}/water",
            get(list_water_intakes).post(create_water_intake),
        )
        .route(
            "/users/{user_id}/water/{id}",
            put(update_water_intake).delete(delete_water_intake),
        )
        .route(
            "/users/{user_id}/sugar",
            get(list_sugar_intakes).post(create_sugar_intake),
        )
        .route(
            "/users/{user_id}/sugar/{id}",
            put(update_sugar_intake).delete(delete_sugar_intake),
        )
        .route_layer(middleware::from_fn(mw_require_auth));

    let public_routes = Router::new()
        .route("/health-check", get(health_check))
        .route("/auth", post(login))
        .route("/token/validate", post(validate_token))
        .route("/token/refresh", post(refresh_token));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            mw_ctx_resolver,
        ))
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Password verification runs on the blocking pool.
async fn login(
    State(state): State<AppState>,
    Payload(payload): Payload<LoginRequest>,
) -> WebResult<Json<TokenResponse>> {
    let response = tokio::task::spawn_blocking(move || {
        session::login(&payload, &state.connection, &state.auth)
    })
    .await
    .map_err(|err| WebError::Internal(err.to_string()))??;

    Ok(Json(response))
}

async fn validate_token(
    State(state): State<AppState>,
    Payload(payload): Payload<TokenRequest>,
) -> WebResult<Json<ValidateTokenResponse>> {
    Ok(Json(session::validate_token(&payload, &state.auth)?))
}

async fn refresh_token(
    State(state): State<AppState>,
    Payload(payload): Payload<TokenRequest>,
) -> WebResult<Json<TokenResponse>> {
    Ok(Json(session::refresh_token(
        &payload,
        &state.connection,
        &state.auth,
    )?))
}

async fn list_users(
    State(state): State<AppState>,
    ctx: Ctx,
) -> WebResult<Json<Vec<UserResponse>>> {
    tracing::debug!("User {} listing users", ctx.user_id);
    Ok(Json(user::list_users(&state.connection)?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> WebResult<Json<UserResponse>> {
    Ok(Json(user::get_user(&user_id, &state.connection)?))
}

async fn list_weights(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> WebResult<Json<Vec<WeightResponse>>> {
    Ok(Json(weight::list(&user_id, &state.connection)?))
}

async fn create_weight(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Payload(payload): Payload<WeightRequest>,
) -> WebResult<Json<WeightResponse>> {
    Ok(Json(weight::create(&user_id, payload, &state.connection)?))
}

async fn update_weight(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    Payload(payload): Payload<WeightRequest>,
) -> WebResult<Json<WeightResponse>> {
    Ok(Json(weight::update(&user_id, &id, payload, &state.connection)?))
}

async fn delete_weight(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
) -> WebResult<Json<WeightResponse>> {
    Ok(Json(weight::delete(&user_id, &id, &state.connection)?))
}

async fn list_blood_pressures(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> WebResult<Json<Vec<BloodPressureResponse>>> {
    Ok(Json(blood_pressure::list(&user_id, &state.connection)?))
}

async fn create_blood_pressure(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Payload(payload): Payload<BloodPressureRequest>,
) -> WebResult<Json<BloodPressureResponse>> {
    Ok(Json(blood_pressure::create(
        &user_id,
        payload,
        &state.connection,
    )?))
}

async fn update_blood_pressure(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    Payload(payload): Payload<BloodPressureRequest>,
) -> WebResult<Json<BloodPressureResponse>> {
    Ok(Json(blood_pressure::update(
        &user_id,
        &id,
        payload,
        &state.connection,
    )?))
}

async fn delete_blood_pressure(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
) -> WebResult<Json<BloodPressureResponse>> {
    Ok(Json(blood_pressure::delete(&user_id, &id, &state.connection)?))
}

async fn list_water_intakes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> WebResult<Json<Vec<WaterIntakeResponse>>> {
    Ok(Json(water_intake::list(&user_id, &state.connection)?))
}

async fn create_water_intake(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Payload(payload): Payload<WaterIntakeRequest>,
) -> WebResult<Json<WaterIntakeResponse>> {
    Ok(Json(water_intake::create(&user_id, payload, &state.connection)?))
}

async fn update_water_intake(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    Payload(payload): Payload<WaterIntakeRequest>,
) -> WebResult<Json<WaterIntakeResponse>> {
    Ok(Json(water_intake::update(
        &user_id,
        &id,
        payload,
        &state.connection,
    )?))
}

async fn delete_water_intake(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
) -> WebResult<Json<WaterIntakeResponse>> {
    Ok(Json(water_intake::delete(&user_id, &id, &state.connection)?))
}

async fn list_sugar_intakes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> WebResult<Json<Vec<SugarIntakeResponse>>> {
    Ok(Json(sugar_intake::list(&user_id, &state.connection)?))
}

async fn create_sugar_intake(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Payload(payload): Payload<SugarIntakeRequest>,
) -> WebResult<Json<SugarIntakeResponse>> {
    Ok(Json(sugar_intake::create(&user_id, payload, &state.connection)?))
}

async fn update_sugar_intake(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    Payload(payload): Payload<SugarIntakeRequest>,
) -> WebResult<Json<SugarIntakeResponse>> {
    Ok(Json(sugar_intake::update(
        &user_id,
        &id,
        payload,
        &state.connection,
    )?))
}

async fn delete_sugar_intake(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
) -> WebResult<Json<SugarIntakeResponse>> {
    Ok(Json(sugar_intake::delete(&user_id, &id, &state.connection)?))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use chrono::TimeDelta;
    use diesel::{
        PgConnection,
        r2d2::{ConnectionManager, Pool},
    };
    use tower::ServiceExt;

    use super::*;

    /// A state whose pool never connects. Only routes that fail before
    /// touching the database can be exercised with it.
    fn offline_state() -> AppState {
        let manager = ConnectionManager::<PgConnection>::new("postgres://offline.invalid/vitals");
        let pool = Pool::builder()
            .min_idle(Some(0))
            .build_unchecked(manager);

        AppState {
            connection: DbConnection { pool },
            auth: AuthConfig::new("api-test-secret", TimeDelta::hours(1)),
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router(offline_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder()
            .uri("/health-check")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_validate_token_returns_identity() {
        let token = offline_state().auth.issue("alice", 42).unwrap();

        let (status, body) = send(post_json("/token/validate", json!({ "token": token }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 42, "username": "alice" }));
    }

    #[tokio::test]
    async fn test_validate_token_rejects_garbage() {
        let (status, body) =
            send(post_json("/token/validate", json!({ "token": "garbage" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid token" }));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage_before_touching_the_store() {
        let (status, body) =
            send(post_json("/token/refresh", json!({ "token": "garbage" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid token" }));
    }

    #[tokio::test]
    async fn test_login_with_empty_fields_is_a_bad_request() {
        let (status, _) = send(post_json(
            "/auth",
            json!({ "username": "", "password": "" }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"username\":"))
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_protected_routes_require_a_token() {
        for (method, uri) in [
            (Method::GET, "/users"),
            (Method::GET, "/users/1"),
            (Method::GET, "/users/1/weight"),
            (Method::POST, "/users/1/blood-pressure"),
            (Method::PUT, "/users/1/water/3"),
            (Method::DELETE, "/users/1/sugar/3"),
        ] {
            let request = Request::builder()
                .method(method.clone())
                .uri(uri)
                .body(Body::empty())
                .unwrap();

            let (status, body) = send(request).await;

            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body, json!({ "error": "Unauthorized" }));
        }
    }

    #[tokio::test]
    async fn test_invalid_ids_are_rejected_before_the_database() {
        let token = offline_state().auth.issue("alice", 42).unwrap();
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/users/abc/weight/1")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid user id" }));
    }
}
