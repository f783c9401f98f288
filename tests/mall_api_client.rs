mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;

use mall_parking_checkpoint::clients::{MallApiClient, MallApiError, ParkingApi};
use mall_parking_checkpoint::dto::park_dto::MailRequest;
use mall_parking_checkpoint::models::TicketId;

use common::{booking, fake_mall_router, serve, FakeMall, SharedMall};

async fn client_with_mall() -> (MallApiClient, SharedMall) {
    let mall: SharedMall = Arc::new(Mutex::new(FakeMall::default()));
    let addr = serve(fake_mall_router(Arc::clone(&mall))).await;
    let client = MallApiClient::new(format!("http://{}/api/", addr), Duration::from_secs(5)).unwrap();
    (client, mall)
}

#[tokio::test]
async fn test_fetch_booking_encodes_ticket() {
    let (client, mall) = client_with_mall().await;
    mall.lock()
        .unwrap()
        .bookings
        .insert("BK 1/2".to_string(), booking("BK 1/2", 5));

    let ticket = TicketId::parse("BK 1/2").unwrap();
    let fetched = client.fetch_booking(&ticket).await.unwrap();
    assert_eq!(fetched.id, "BK 1/2");
    assert!(fetched.arrival_time.is_none());
}

#[tokio::test]
async fn test_missing_booking_carries_server_message() {
    let (client, _) = client_with_mall().await;

    let err = client
        .fetch_booking(&TicketId::parse("NOPE").unwrap())
        .await
        .unwrap_err();
    match &err {
        MallApiError::Status { status, .. } => assert_eq!(*status, StatusCode::NOT_FOUND),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(err.server_message(), Some("Booking not found"));
}

#[tokio::test]
async fn test_arrival_and_disable_round() {
    let (client, mall) = client_with_mall().await;
    mall.lock()
        .unwrap()
        .bookings
        .insert("BK1001".to_string(), booking("BK1001", 12));

    client
        .register_arrival("BK1001", "2026-10-19T09:00:00.000+05:30")
        .await
        .unwrap();
    let settlement = client
        .disable_booking("BK1001", "2026-10-19T10:30:00.000+05:30")
        .await
        .unwrap();

    assert_eq!(settlement.total_cost, rust_decimal::Decimal::from(300));
    assert!(settlement.departure_time.unwrap() > settlement.arrival_time.unwrap());
    assert!(!mall.lock().unwrap().bookings["BK1001"].is_active);
}

#[tokio::test]
async fn test_mail_failure_is_an_error() {
    let (client, mall) = client_with_mall().await;
    mall.lock().unwrap().mail_down = true;

    let mail = MailRequest {
        subject: "Booking Disabled".to_string(),
        html: "<p>bye</p>".to_string(),
    };
    let err = client.send_mail("U42", &mail).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Mail service unavailable"));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let client = MallApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
    let err = client.list_bookings().await.unwrap_err();
    assert!(matches!(err, MallApiError::Transport(_)));
    assert_eq!(err.server_message(), None);
}
