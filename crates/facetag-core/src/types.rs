use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Label given to a face that matches no known encoding.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Bounding box for a detected face, with optional facial landmarks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
    /// Five-point facial landmarks: [left_eye, right_eye, nose, left_mouth, right_mouth].
    pub landmarks: Option<[(f32, f32); 5]>,
}

impl BoundingBox {
    /// Round the box to integer pixels, clamped to an image of `width` × `height`.
    pub fn location(&self, width: u32, height: u32) -> FaceLocation {
        let max_x = width.saturating_sub(1) as f32;
        let max_y = height.saturating_sub(1) as f32;
        let clamp = |v: f32, max: f32| v.round().clamp(0.0, max) as u32;

        FaceLocation {
            top: clamp(self.y, max_y),
            right: clamp(self.x + self.width, max_x),
            bottom: clamp(self.y + self.height, max_y),
            left: clamp(self.x, max_x),
        }
    }
}

/// Integer face rectangle in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceLocation {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Face encoding (512-dimensional for ArcFace).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    pub values: Vec<f32>,
    /// Model version that produced this embedding (e.g., "w600k_r50").
    pub model_version: Option<String>,
}

impl Embedding {
    /// Cosine similarity in [-1, 1]. Higher = more similar.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;

        for (a, b) in self.values.iter().zip(other.values.iter()) {
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom > 0.0 { dot / denom } else { 0.0 }
    }

    /// Euclidean distance between two encodings. Lower = more similar.
    pub fn euclidean_distance(&self, other: &Embedding) -> f32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }
}

/// One entry of the known set: a name and the encoding of its reference face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownFace {
    pub name: String,
    pub embedding: Embedding,
    /// Image the encoding was computed from.
    pub source: PathBuf,
}

/// Result of matching a probe encoding against the known set.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matched: bool,
    /// Distance to the closest known encoding (`None` for an empty known set).
    pub distance: Option<f32>,
    /// Index of the matched known face (if any).
    pub index: Option<usize>,
    /// Name of the matched known face (if any).
    pub name: Option<String>,
}

impl MatchResult {
    /// The label to show for this face: the matched name or [`UNKNOWN_NAME`].
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_NAME)
    }
}

/// Strategy for comparing a probe encoding against the known set.
pub trait Matcher {
    fn compare(&self, probe: &Embedding, known: &[KnownFace], tolerance: f32) -> MatchResult;
}

/// Nearest-neighbour matcher over Euclidean distance.
///
/// Picks the closest known encoding and accepts it only when its distance is
/// within `tolerance`. Ties go to the earlier entry.
pub struct DistanceMatcher;

impl Matcher for DistanceMatcher {
    fn compare(&self, probe: &Embedding, known: &[KnownFace], tolerance: f32) -> MatchResult {
        let mut best_dist = f32::INFINITY;
        let mut best_idx: Option<usize> = None;

        for (i, face) in known.iter().enumerate() {
            let dist = probe.euclidean_distance(&face.embedding);
            if best_idx.is_none() || dist < best_dist {
                best_dist = dist;
                best_idx = Some(i);
            }
        }

        match best_idx {
            Some(idx) if best_dist <= tolerance => MatchResult {
                matched: true,
                distance: Some(best_dist),
                index: Some(idx),
                name: Some(known[idx].name.clone()),
            },
            Some(_) => MatchResult {
                matched: false,
                distance: Some(best_dist),
                index: None,
                name: None,
            },
            None => MatchResult {
                matched: false,
                distance: None,
                index: None,
                name: None,
            },
        }
    }
}
