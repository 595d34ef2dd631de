//! Unit tests for annotation format implementations.
//!
//! These tests check the exact bytes/lines each export produces and that the
//! importable formats read back what they wrote.


use crate::model::Annotation;

/// The two-record example used across format tests.
fn sample_annotations() -> Vec<Annotation> {
    vec![
        Annotation::new("/tmp/photo.jpg", "cat"),
        Annotation::new("/tmp/clip.wav", "bark"),
    ]
}
