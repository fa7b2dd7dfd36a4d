//! facetag-render — Turns a recognition result into a report: annotated
//! image, JPEG bytes, Base64 text and the HTML page embedding them.

pub mod annotate;
pub mod encode;
pub mod html;

pub use ab_glyph::FontVec;
pub use annotate::{annotate_faces, load_font, resolve_font, FontError};
pub use encode::{convert_to_jpeg, encode_to_base64, jpeg_bytes, EncodeError, DEFAULT_JPEG_QUALITY};
pub use html::create_html_response;
