//! Network test against a locally running receiver. Start one with
//! `cargo run -p receiver`, then `cargo test -p datalogger -- --ignored`.

use std::time::Duration;

fn encode_record(
    device_id: u32,
    temperature: f32,
    humidity: f32,
    moisture_pct: u8,
    timestamp: u32,
) -> [u8; 17] {
    let mut buf = [0u8; 17];
    buf[0..4].copy_from_slice(&device_id.to_le_bytes());
    buf[4..8].copy_from_slice(&temperature.to_le_bytes());
    buf[8..12].copy_from_slice(&humidity.to_le_bytes());
    buf[12] = moisture_pct;
    buf[13..17].copy_from_slice(&timestamp.to_le_bytes());
    buf
}

#[tokio::test]
#[ignore]
async fn test_upload_blob_to_local_receiver() {
    let url = std::env::var("SERVER_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3000/api/v1/readings".to_string());

    let mut body = Vec::new();
    for i in 0..3u32 {
        body.extend_from_slice(&encode_record(12345, 21.5, 48.0, 55, 1_700_000_000 + i));
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let response = client
        .post(&url)
        .header("Content-Type", "application/octet-stream")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
#[ignore]
async fn test_misaligned_upload_is_rejected() {
    let url = std::env::var("SERVER_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3000/api/v1/readings".to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let response = client
        .post(&url)
        .header("Content-Type", "application/octet-stream")
        .body(vec![0u8; 16])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}
