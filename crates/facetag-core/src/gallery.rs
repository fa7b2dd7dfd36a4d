//! Known-face set construction.

use crate::engine::{EngineError, FaceEngine};
use crate::loader::load_image_file;
use crate::types::{Embedding, KnownFace};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A reference image paired with the name of the person in it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KnownPerson {
    pub name: String,
    pub image: PathBuf,
}

impl KnownPerson {
    pub fn new(name: impl Into<String>, image: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), image: image.into() }
    }
}

/// The known set: encodings and names kept index-aligned.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    pub faces: Vec<KnownFace>,
}

impl Gallery {
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.faces.iter().map(|f| f.name.as_str())
    }
}

/// Encode one reference face per person.
///
/// When an image holds several faces, the first (most confident) one is used.
/// Images without a face, and images that fail to load or encode, are logged
/// and skipped.
pub fn encode_faces(engine: &mut dyn FaceEngine, people: &[KnownPerson]) -> Gallery {
    let mut gallery = Gallery::default();

    for person in people {
        match first_encoding(engine, &person.image) {
            Ok(Some(embedding)) => {
                tracing::info!(name = %person.name, path = %person.image.display(), "encoded known face");
                gallery.faces.push(KnownFace {
                    name: person.name.clone(),
                    embedding,
                    source: person.image.clone(),
                });
            }
            Ok(None) => {
                tracing::warn!(path = %person.image.display(), "no face detected; skipping");
            }
            Err(err) => {
                tracing::error!(path = %person.image.display(), error = %err, "failed to process known image; skipping");
            }
        }
    }

    tracing::info!(known = gallery.len(), requested = people.len(), "known set ready");
    gallery
}

fn first_encoding(engine: &mut dyn FaceEngine, path: &Path) -> Result<Option<Embedding>, EngineError> {
    let image = load_image_file(path)?;
    let faces = engine.face_locations(&image)?;
    let Some(first) = faces.first() else {
        return Ok(None);
    };
    let mut encodings = engine.face_encodings(&image, std::slice::from_ref(first))?;
    Ok(encodings.pop())
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// TOML list of known people.
///
/// ```toml
/// [[person]]
/// name = "Ada"
/// image = "faces/ada.jpg"
/// ```
#[derive(Debug, Deserialize)]
pub struct GalleryManifest {
    #[serde(default, rename = "person")]
    pub people: Vec<KnownPerson>,
}

impl GalleryManifest {
    /// Load a manifest. Relative image paths resolve against the manifest's directory.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: display.clone(),
            source,
        })?;
        let mut manifest: GalleryManifest =
            toml::from_str(&text).map_err(|source| ManifestError::Parse { path: display, source })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for person in &mut manifest.people {
            if person.image.is_relative() {
                person.image = base.join(&person.image);
            }
        }
        Ok(manifest)
    }
}
