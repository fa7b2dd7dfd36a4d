//! End-to-end run: known set → recognition → annotated image → report.

use crate::config::Config;
use facetag_core::{
    encode_faces, recognize_faces, write_placeholder, DistanceMatcher, FaceEngine, KnownPerson, RecognizedFace,
};
use facetag_render::{annotate_faces, convert_to_jpeg, create_html_response, encode_to_base64, FontVec};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Side length of generated placeholder images.
const PLACEHOLDER_SIZE: u32 = 100;

/// The reference images used when none are given on the command line.
pub fn default_people() -> Vec<KnownPerson> {
    (1..=3)
        .map(|i| KnownPerson::new(format!("Known Person {i}"), format!("known_person_{i}.jpg")))
        .collect()
}

pub const DEFAULT_UNKNOWN_IMAGE: &str = "unknown_person.jpg";

/// Create a blank white image at each path that does not exist yet.
pub fn create_placeholders<'a>(paths: impl IntoIterator<Item = &'a Path>) {
    for path in paths {
        if path.exists() {
            continue;
        }
        match write_placeholder(path, PLACEHOLDER_SIZE) {
            Ok(()) => tracing::info!(path = %path.display(), "created placeholder image"),
            Err(err) => tracing::error!(error = %err, "failed to create placeholder image"),
        }
    }
}

/// What a run produced.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Names that made it into the known set.
    pub known: Vec<String>,
    pub unknown_image: PathBuf,
    pub faces: Vec<RecognizedFace>,
    /// Annotated JPEG, Base64-encoded; absent when recognition failed.
    pub image_base64: Option<String>,
}

impl Report {
    pub fn to_html(&self) -> String {
        let names: Vec<String> = self.faces.iter().map(|f| f.name.clone()).collect();
        let locations: Vec<_> = self.faces.iter().map(|f| f.location).collect();
        create_html_response(self.image_base64.as_deref(), &names, &locations)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Encode the known people, recognize faces in `unknown`, and build the report.
///
/// Per-image failures never abort the run: a failed known image is skipped
/// and a failed unknown image yields a report with no image and no faces.
pub fn run(
    engine: &mut dyn FaceEngine,
    config: &Config,
    font: Option<&FontVec>,
    people: &[KnownPerson],
    unknown: &Path,
) -> Report {
    let gallery = encode_faces(engine, people);

    let recognition = match recognize_faces(engine, &DistanceMatcher, unknown, &gallery, config.tolerance) {
        Ok(recognition) => Some(recognition),
        Err(err) => {
            tracing::error!(path = %unknown.display(), error = %err, "failed to process unknown image");
            None
        }
    };

    let (image, faces) = match recognition {
        Some(mut r) => {
            annotate_faces(&mut r.image, &r.faces, font);
            (Some(r.image), r.faces)
        }
        None => (None, Vec::new()),
    };

    let jpeg = convert_to_jpeg(image.as_ref(), config.jpeg_quality);
    let image_base64 = encode_to_base64(jpeg.as_deref());

    tracing::info!(
        faces = faces.len(),
        matched = faces.iter().filter(|f| f.matched).count(),
        "recognition finished"
    );

    Report {
        known: gallery.names().map(str::to_string).collect(),
        unknown_image: unknown.to_path_buf(),
        faces,
        image_base64,
    }
}
