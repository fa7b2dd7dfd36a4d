//! Draw face boxes and name labels onto an image.

use ab_glyph::{FontVec, PxScale};
use facetag_core::{FaceLocation, RecognizedFace};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BOX_COLOUR: Rgb<u8> = Rgb([0, 0, 255]);
const TEXT_COLOUR: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_SCALE: f32 = 14.0;
/// Text height assumed for the label band when no font is available.
const FALLBACK_TEXT_HEIGHT: u32 = 11;
/// Label band extends this far above the text.
const LABEL_PADDING: i32 = 10;
const TEXT_INSET_X: i32 = 6;
const TEXT_INSET_Y: i32 = 5;

/// TrueType fonts tried, in order, when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font file: {0}")]
    Invalid(String),
}

/// Load a TrueType/OpenType font from disk.
pub fn load_font(path: &Path) -> Result<FontVec, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.display().to_string(),
        source,
    })?;
    FontVec::try_from_vec(data).map_err(|_| FontError::Invalid(path.display().to_string()))
}

/// Load the configured font, or the first readable system font.
///
/// Returns `None` (after logging) when nothing usable is found; labels are
/// then drawn without text.
pub fn resolve_font(configured: Option<&Path>) -> Option<FontVec> {
    if let Some(path) = configured {
        match load_font(path) {
            Ok(font) => return Some(font),
            Err(err) => tracing::warn!(error = %err, "configured font unusable; trying system fonts"),
        }
    }

    let found = SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .find_map(|p| load_font(&p).ok().map(|font| (p, font)));

    match found {
        Some((path, font)) => {
            tracing::debug!(path = %path.display(), "using system font for labels");
            Some(font)
        }
        None => {
            tracing::warn!("no font found; face labels will be drawn without text");
            None
        }
    }
}

/// Draw a box and a name label for every face.
pub fn annotate_faces(image: &mut RgbImage, faces: &[RecognizedFace], font: Option<&FontVec>) {
    for face in faces {
        draw_face(image, &face.location, &face.name, font);
    }
}

/// Box around the face, with a filled band along its bottom edge holding the name.
fn draw_face(image: &mut RgbImage, loc: &FaceLocation, name: &str, font: Option<&FontVec>) {
    let scale = PxScale::from(LABEL_SCALE);
    let text_height = match font {
        Some(font) => text_size(scale, font, name).1,
        None => FALLBACK_TEXT_HEIGHT,
    } as i32;

    let (left, top, right, bottom) = (loc.left as i32, loc.top as i32, loc.right as i32, loc.bottom as i32);

    draw_hollow_rect_mut(image, corners(left, top, right, bottom), BOX_COLOUR);

    let band_top = bottom - text_height - LABEL_PADDING;
    draw_filled_rect_mut(image, corners(left, band_top, right, bottom), BOX_COLOUR);

    if let Some(font) = font {
        draw_text_mut(
            image,
            TEXT_COLOUR,
            left + TEXT_INSET_X,
            bottom - text_height - TEXT_INSET_Y,
            scale,
            font,
            name,
        );
    }
}

/// Rectangle spanning both corners inclusively; never empty.
fn corners(left: i32, top: i32, right: i32, bottom: i32) -> Rect {
    let width = (right - left + 1).max(1) as u32;
    let height = (bottom - top + 1).max(1) as u32;
    Rect::at(left, top).of_size(width, height)
}
