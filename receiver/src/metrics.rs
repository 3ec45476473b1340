use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref UPLOADS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_uploads_total",
        "Total upload requests received"
    ))
    .unwrap();
    pub static ref RECORDS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_records_total",
        "Total sensor records decoded from uploads"
    ))
    .unwrap();
    pub static ref INVALID_UPLOADS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_invalid_uploads_total",
        "Total uploads rejected for misaligned body length"
    ))
    .unwrap();
    pub static ref UPLOAD_BYTES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "receiver_upload_bytes_total",
        "Total accepted upload payload bytes"
    ))
    .unwrap();
}

pub fn init_metrics() {
    REGISTRY.register(Box::new(UPLOADS_TOTAL.clone())).unwrap();
    REGISTRY.register(Box::new(RECORDS_TOTAL.clone())).unwrap();
    REGISTRY
        .register(Box::new(INVALID_UPLOADS_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(UPLOAD_BYTES_TOTAL.clone()))
        .unwrap();
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
