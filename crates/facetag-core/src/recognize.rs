//! Face recognition in an unknown image against the known set.

use crate::engine::{EngineError, FaceEngine};
use crate::gallery::Gallery;
use crate::loader::load_image_file;
use crate::types::{FaceLocation, Matcher};
use image::RgbImage;
use serde::Serialize;
use std::path::Path;

/// Default matching tolerance for L2-normalized ArcFace encodings.
///
/// Euclidean distance 1.10 between unit vectors is a cosine similarity of
/// about 0.40.
pub const DEFAULT_TOLERANCE: f32 = 1.10;

/// One face found in the unknown image.
#[derive(Debug, Clone, Serialize)]
pub struct RecognizedFace {
    /// Matched name, or `"Unknown"`.
    pub name: String,
    pub location: FaceLocation,
    /// Distance to the closest known encoding; `None` with an empty known set.
    pub distance: Option<f32>,
    pub matched: bool,
}

/// The unknown image and every face found in it, in detection order.
#[derive(Debug, Clone)]
pub struct Recognition {
    pub image: RgbImage,
    pub faces: Vec<RecognizedFace>,
}

impl Recognition {
    pub fn names(&self) -> Vec<String> {
        self.faces.iter().map(|f| f.name.clone()).collect()
    }

    pub fn locations(&self) -> Vec<FaceLocation> {
        self.faces.iter().map(|f| f.location).collect()
    }
}

/// Locate, encode and label every face in the image at `path`.
pub fn recognize_faces(
    engine: &mut dyn FaceEngine,
    matcher: &dyn Matcher,
    path: &Path,
    gallery: &Gallery,
    tolerance: f32,
) -> Result<Recognition, EngineError> {
    let image = load_image_file(path)?;
    let boxes = engine.face_locations(&image)?;
    let encodings = engine.face_encodings(&image, &boxes)?;

    tracing::info!(path = %path.display(), faces = boxes.len(), "located faces in unknown image");

    let faces = boxes
        .iter()
        .zip(encodings.iter())
        .map(|(bbox, encoding)| {
            let result = matcher.compare(encoding, &gallery.faces, tolerance);
            let face = RecognizedFace {
                name: result.label().to_string(),
                location: bbox.location(image.width(), image.height()),
                distance: result.distance,
                matched: result.matched,
            };
            let similarity = result.index.map(|i| encoding.similarity(&gallery.faces[i].embedding));
            tracing::debug!(
                name = %face.name,
                distance = ?face.distance,
                similarity = ?similarity,
                confidence = bbox.confidence,
                "face labelled"
            );
            face
        })
        .collect();

    Ok(Recognition { image, faces })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{write_marked, FakeEngine};
    use crate::gallery::{encode_faces, KnownPerson};
    use crate::types::{DistanceMatcher, UNKNOWN_NAME};

    fn gallery_of(dir: &Path, people: &[(&str, [u8; 3])]) -> Gallery {
        let people: Vec<KnownPerson> = people
            .iter()
            .map(|(name, colour)| {
                let path = dir.join(format!("{name}.png"));
                write_marked(&path, &[(0, *colour)]);
                KnownPerson::new(*name, path)
            })
            .collect();
        encode_faces(&mut FakeEngine, &people)
    }

    #[test]
    fn test_recognize_labels_known_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = gallery_of(dir.path(), &[("Red", [255, 0, 0]), ("Green", [0, 255, 0])]);

        let unknown = dir.path().join("unknown.png");
        // near-red, then a colour far from both known faces
        write_marked(&unknown, &[(5, [250, 10, 0]), (25, [0, 0, 255])]);

        let result = recognize_faces(&mut FakeEngine, &DistanceMatcher, &unknown, &gallery, 0.6).unwrap();
        assert_eq!(result.names(), vec!["Red".to_string(), UNKNOWN_NAME.to_string()]);
        assert!(result.faces[0].matched);
        assert!(!result.faces[1].matched);
        assert_eq!(
            result.locations()[0],
            FaceLocation { top: 0, right: 15, bottom: 10, left: 5 }
        );
        assert_eq!(result.image.dimensions(), (40, 40));
    }

    #[test]
    fn test_recognize_with_empty_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let unknown = dir.path().join("unknown.png");
        write_marked(&unknown, &[(5, [255, 0, 0])]);

        let result =
            recognize_faces(&mut FakeEngine, &DistanceMatcher, &unknown, &Gallery::default(), 0.6).unwrap();
        assert_eq!(result.names(), vec![UNKNOWN_NAME.to_string()]);
        assert_eq!(result.faces[0].distance, None);
    }

    #[test]
    fn test_recognize_no_faces() {
        let dir = tempfile::tempdir().unwrap();
        let unknown = dir.path().join("blank.png");
        write_marked(&unknown, &[]);

        let result =
            recognize_faces(&mut FakeEngine, &DistanceMatcher, &unknown, &Gallery::default(), 0.6).unwrap();
        assert!(result.faces.is_empty());
    }

    #[test]
    fn test_recognize_missing_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = recognize_faces(
            &mut FakeEngine,
            &DistanceMatcher,
            &dir.path().join("missing.png"),
            &Gallery::default(),
            0.6,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Load(_)));
    }
}
