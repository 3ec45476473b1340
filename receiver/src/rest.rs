use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::DateTime;
use tracing::{debug, info, warn};

use crate::metrics::{
    INVALID_UPLOADS_TOTAL, RECORDS_TOTAL, UPLOADS_TOTAL, UPLOAD_BYTES_TOTAL,
};
use crate::record::{decode_all, UploadSummary, RECORD_LEN};

pub fn create_router() -> Router {
    Router::new()
        .route("/api/v1/readings", post(ingest_readings))
        .route("/metrics", get(metrics_handler))
}

/// Accepts a raw concatenation of 17-byte records. The body length is
/// the only framing: anything that is not a positive multiple of the
/// record size is rejected before decoding.
async fn ingest_readings(body: Bytes) -> Response {
    UPLOADS_TOTAL.inc();

    if body.is_empty() || body.len() % RECORD_LEN != 0 {
        INVALID_UPLOADS_TOTAL.inc();
        warn!(
            "Rejecting upload: body length {} is not a positive multiple of {}",
            body.len(),
            RECORD_LEN
        );
        return (
            StatusCode::BAD_REQUEST,
            format!(
                "Body length {} is not a positive multiple of {}",
                body.len(),
                RECORD_LEN
            ),
        )
            .into_response();
    }

    let records = decode_all(&body);
    for record in &records {
        let ts = DateTime::from_timestamp(record.timestamp as i64, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| record.timestamp.to_string());
        debug!(
            "Record from device {}: temperature={:.1} humidity={:.1} moisture={}% at {}",
            record.device_id, record.temperature, record.humidity, record.moisture_pct, ts
        );
    }

    RECORDS_TOTAL.inc_by(records.len() as f64);
    UPLOAD_BYTES_TOTAL.inc_by(body.len() as f64);
    info!("Accepted {} records ({} bytes)", records.len(), body.len());

    Json(UploadSummary {
        accepted: records.len(),
        bytes: body.len(),
    })
    .into_response()
}

async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}
