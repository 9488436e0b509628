//! Prometheus metrics for fitness-service.
//!
//! Exposes store and media collectors and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use prometheus::{Encoder, TextEncoder};

pub mod media;
pub mod store;

pub use media::{record_media_failed, record_media_stored, record_post_with_media_created};
pub use store::record_store_operation;

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn exposition_includes_recorded_counters() {
        record_store_operation("posts", "save", true);
        record_media_stored();

        let resp = serve_metrics().await;
        assert!(resp.status().is_success());

        let body = to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("fitness_store_operations_total"));
        assert!(text.contains("fitness_media_files_total"));
    }
}
