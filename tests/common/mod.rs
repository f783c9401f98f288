//! API del mall simulado en proceso y arranque del checkpoint para tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde_json::json;

use mall_parking_checkpoint::config::environment::EnvironmentConfig;
use mall_parking_checkpoint::dto::park_dto::{MailRequest, TimeUpdateRequest};
use mall_parking_checkpoint::models::{Booking, BookingUser, ParkingSlot, SlotLabel};
use mall_parking_checkpoint::{create_app, AppState};

pub const HOURLY_RATE: i64 = 150;

#[derive(Default)]
pub struct FakeMall {
    pub bookings: HashMap<String, Booking>,
    pub mails: Vec<(String, MailRequest)>,
    pub times: Vec<String>,
    pub mail_down: bool,
    /// Las búsquedas responden 500 con un cuerpo que no es JSON
    pub lookup_broken: bool,
}

pub type SharedMall = Arc<Mutex<FakeMall>>;

pub fn booking(id: &str, slot: i64) -> Booking {
    Booking {
        id: id.to_string(),
        user: BookingUser {
            id: "U42".to_string(),
            username: "nimal".to_string(),
        },
        car_number: "CAB-1234".to_string(),
        parking_slot: Some(ParkingSlot {
            id: Some(format!("S{}", slot)),
            slot: SlotLabel::Number(slot),
        }),
        booking_time: Some(Utc::now()),
        arrival_time: None,
        is_active: true,
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Booking not found" })),
    )
        .into_response()
}

fn parse_time(time: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(time)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

async fn list_bookings(State(mall): State<SharedMall>) -> Json<Vec<Booking>> {
    let mall = mall.lock().unwrap();
    let mut bookings: Vec<Booking> = mall.bookings.values().cloned().collect();
    bookings.sort_by(|a, b| a.id.cmp(&b.id));
    Json(bookings)
}

async fn get_booking(State(mall): State<SharedMall>, Path(id): Path<String>) -> Response {
    let mall = mall.lock().unwrap();
    if mall.lookup_broken {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    match mall.bookings.get(&id) {
        Some(booking) => Json(booking.clone()).into_response(),
        None => not_found(),
    }
}

async fn set_arrival(
    State(mall): State<SharedMall>,
    Path(id): Path<String>,
    Json(body): Json<TimeUpdateRequest>,
) -> Response {
    let mut mall = mall.lock().unwrap();
    mall.times.push(body.time.clone());
    let Some(arrival) = parse_time(&body.time) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Invalid time" })))
            .into_response();
    };
    match mall.bookings.get_mut(&id) {
        Some(booking) => {
            booking.arrival_time = Some(arrival);
            Json(json!({ "message": "Arrival time updated" })).into_response()
        }
        None => not_found(),
    }
}

/// Cobra horas iniciadas, con un mínimo de una hora
async fn disable_booking(
    State(mall): State<SharedMall>,
    Path(id): Path<String>,
    Json(body): Json<TimeUpdateRequest>,
) -> Response {
    let mut mall = mall.lock().unwrap();
    mall.times.push(body.time.clone());
    let Some(departure) = parse_time(&body.time) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Invalid time" })))
            .into_response();
    };
    let Some(booking) = mall.bookings.get_mut(&id) else {
        return not_found();
    };
    let Some(arrival) = booking.arrival_time else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Vehicle has not arrived" })),
        )
            .into_response();
    };

    booking.is_active = false;
    let minutes = (departure - arrival).num_minutes().max(0);
    let hours = ((minutes + 59) / 60).max(1);

    Json(json!({
        "arrivalTime": arrival,
        "departureTime": departure,
        "totalCost": hours * HOURLY_RATE,
        "message": "Booking disabled successfully"
    }))
    .into_response()
}

async fn send_mail(
    State(mall): State<SharedMall>,
    Path(user_id): Path<String>,
    Json(body): Json<MailRequest>,
) -> Response {
    let mut mall = mall.lock().unwrap();
    if mall.mail_down {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "message": "Mail service unavailable" })),
        )
            .into_response();
    }
    mall.mails.push((user_id, body));
    Json(json!({ "message": "Mail sent" })).into_response()
}

pub fn fake_mall_router(mall: SharedMall) -> Router {
    Router::new()
        .route("/api/park/bookings", get(list_bookings))
        .route("/api/park/:id", get(get_booking))
        .route("/api/park/time/:id", put(set_arrival))
        .route("/api/park/disable/:id", put(disable_booking))
        .route("/api/mail/:user_id", post(send_mail))
        .with_state(mall)
}

pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub struct Harness {
    pub mall: SharedMall,
    pub mall_api_url: String,
    pub checkpoint_url: String,
    pub state: AppState,
    pub http: reqwest::Client,
}

impl Harness {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    pub async fn start_with(configure: impl FnOnce(&mut EnvironmentConfig)) -> Self {
        let mall: SharedMall = Arc::new(Mutex::new(FakeMall::default()));
        let mall_addr = serve(fake_mall_router(Arc::clone(&mall))).await;
        let mall_api_url = format!("http://{}/api", mall_addr);

        let mut config = EnvironmentConfig {
            mall_api_base_url: mall_api_url.clone(),
            http_timeout_secs: 5,
            ..EnvironmentConfig::default()
        };
        configure(&mut config);
        let state = AppState::new(config).unwrap();
        let checkpoint_addr = serve(create_app(state.clone())).await;

        Self {
            mall,
            mall_api_url,
            checkpoint_url: format!("http://{}", checkpoint_addr),
            state,
            http: reqwest::Client::new(),
        }
    }

    pub fn insert(&self, booking: Booking) {
        self.mall
            .lock()
            .unwrap()
            .bookings
            .insert(booking.id.clone(), booking);
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = self
            .http
            .post(format!("{}{}", self.checkpoint_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.json().await.unwrap())
    }

    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .http
            .get(format!("{}{}", self.checkpoint_url, path))
            .send()
            .await
            .unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.json().await.unwrap())
    }

    /// Esperar a que el checkpoint llegue a un estado (escaneo por cámara)
    pub async fn wait_for_state(&self, state: &str) -> serde_json::Value {
        for _ in 0..100 {
            let (_, view) = self.get("/api/checkpoint").await;
            if view["state"] == state {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("checkpoint never reached state {}", state);
    }
}
