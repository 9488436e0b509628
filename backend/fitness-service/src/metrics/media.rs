use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    /// Uploaded media files by outcome (stored/failed).
    pub static ref MEDIA_FILES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "fitness_media_files_total",
        "Uploaded media files segmented by outcome",
        &["result"]
    )
    .expect("failed to register fitness_media_files_total");

    /// Posts created through the multipart endpoint.
    pub static ref POSTS_WITH_MEDIA_CREATED_TOTAL: IntCounter = register_int_counter!(
        "fitness_posts_with_media_created_total",
        "Posts created via save-with-media"
    )
    .expect("failed to register fitness_posts_with_media_created_total");
}

pub fn record_media_stored() {
    MEDIA_FILES_TOTAL.with_label_values(&["stored"]).inc();
}

pub fn record_media_failed() {
    MEDIA_FILES_TOTAL.with_label_values(&["failed"]).inc();
}

pub fn record_post_with_media_created() {
    POSTS_WITH_MEDIA_CREATED_TOTAL.inc();
}
