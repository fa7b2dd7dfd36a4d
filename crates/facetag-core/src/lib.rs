//! facetag-core — Face detection, encoding and matching.
//!
//! Uses SCRFD for face detection and ArcFace for face encodings, both running
//! via ONNX Runtime on the CPU. Matching is nearest-neighbour over Euclidean
//! distance with a tolerance.

pub mod alignment;
pub mod detector;
pub mod engine;
pub mod gallery;
pub mod loader;
pub mod recognize;
pub mod recognizer;
pub mod types;

use std::path::PathBuf;

pub use engine::{EngineError, FaceEngine, OnnxEngine};
pub use gallery::{encode_faces, Gallery, GalleryManifest, KnownPerson};
pub use loader::{load_image_file, write_placeholder};
pub use recognize::{recognize_faces, Recognition, RecognizedFace, DEFAULT_TOLERANCE};
pub use types::{
    BoundingBox, DistanceMatcher, Embedding, FaceLocation, KnownFace, MatchResult, Matcher, UNKNOWN_NAME,
};

/// SCRFD detection model file name.
pub const SCRFD_MODEL_FILE: &str = "det_10g.onnx";
/// ArcFace recognition model file name.
pub const ARCFACE_MODEL_FILE: &str = "w600k_r50.onnx";

/// Default model directory: `$XDG_DATA_HOME/facetag/models`, falling back to
/// `~/.local/share/facetag/models`.
pub fn default_model_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local/share")
        })
        .join("facetag")
        .join("models")
}
