//! The face-recognition engine seam: locate faces, then encode them.

use crate::detector::{DetectorError, FaceDetector};
use crate::loader::LoadError;
use crate::recognizer::{FaceRecognizer, RecognizerError};
use crate::types::{BoundingBox, Embedding};
use image::RgbImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("detector error: {0}")]
    Detector(#[from] DetectorError),
    #[error("recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),
}

/// Face detection and encoding backend.
pub trait FaceEngine {
    /// Locate faces in `image`, most confident first.
    fn face_locations(&mut self, image: &RgbImage) -> Result<Vec<BoundingBox>, EngineError>;

    /// Encode each of `faces` (as returned by [`face_locations`](Self::face_locations)),
    /// in the same order.
    fn face_encodings(
        &mut self,
        image: &RgbImage,
        faces: &[BoundingBox],
    ) -> Result<Vec<Embedding>, EngineError>;
}

/// SCRFD + ArcFace running on ONNX Runtime.
pub struct OnnxEngine {
    detector: FaceDetector,
    recognizer: FaceRecognizer,
}

impl OnnxEngine {
    /// Load both models. Fails fast if either is missing.
    pub fn load(scrfd_path: &Path, arcface_path: &Path) -> Result<Self, EngineError> {
        let detector = FaceDetector::load(scrfd_path)?;
        let recognizer = FaceRecognizer::load(arcface_path)?;
        Ok(Self { detector, recognizer })
    }
}

impl FaceEngine for OnnxEngine {
    fn face_locations(&mut self, image: &RgbImage) -> Result<Vec<BoundingBox>, EngineError> {
        Ok(self.detector.detect(image)?)
    }

    fn face_encodings(
        &mut self,
        image: &RgbImage,
        faces: &[BoundingBox],
    ) -> Result<Vec<Embedding>, EngineError> {
        faces
            .iter()
            .map(|face| self.recognizer.extract(image, face).map_err(EngineError::from))
            .collect()
    }
}
