//! HTML report page.

use facetag_core::FaceLocation;
use std::fmt::Write;

const PAGE_TITLE: &str = "Face Recognition Output";

/// Build the report page: the Base64 JPEG (if any) followed by the list of
/// recognised faces.
///
/// Names are listed with their locations when both are present, alone when
/// only names are given. An empty Base64 string counts as no image.
pub fn create_html_response(
    image_base64: Option<&str>,
    names: &[String],
    locations: &[FaceLocation],
) -> String {
    let mut html = format!("<html><head><title>{PAGE_TITLE}</title></head><body>");

    match image_base64.filter(|b| !b.is_empty()) {
        Some(b64) => {
            let _ = write!(html, "<img src='data:image/jpeg;base64,{b64}'/>");
        }
        None => html.push_str("<p>No image to display.</p>"),
    }

    if names.is_empty() {
        html.push_str("<p>No faces recognized.</p>");
    } else {
        html.push_str("<div><h2>Recognized Faces:</h2><ul>");
        if locations.is_empty() {
            for name in names {
                let _ = write!(html, "<li>{}</li>", escape(name));
            }
        } else {
            for (name, loc) in names.iter().zip(locations) {
                let _ = write!(
                    html,
                    "<li>{} at ({}, {}), ({}, {})</li>",
                    escape(name),
                    loc.left,
                    loc.top,
                    loc.right,
                    loc.bottom
                );
            }
        }
        html.push_str("</ul></div>");
    }

    html.push_str("</body></html>");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = "<html><head><title>Face Recognition Output</title></head><body>";

    fn loc(left: u32, top: u32, right: u32, bottom: u32) -> FaceLocation {
        FaceLocation { top, right, bottom, left }
    }

    #[test]
    fn test_empty_report() {
        let html = create_html_response(None, &[], &[]);
        assert_eq!(
            html,
            format!("{HEAD}<p>No image to display.</p><p>No faces recognized.</p></body></html>")
        );
    }

    #[test]
    fn test_names_with_locations() {
        let names = vec!["Known Person 1".to_string(), "Unknown".to_string()];
        let locations = vec![loc(10, 20, 110, 120), loc(200, 5, 260, 70)];
        let html = create_html_response(Some("QUJD"), &names, &locations);
        assert_eq!(
            html,
            format!(
                "{HEAD}<img src='data:image/jpeg;base64,QUJD'/>\
                 <div><h2>Recognized Faces:</h2><ul>\
                 <li>Known Person 1 at (10, 20), (110, 120)</li>\
                 <li>Unknown at (200, 5), (260, 70)</li>\
                 </ul></div></body></html>"
            )
        );
    }

    #[test]
    fn test_names_without_locations() {
        let names = vec!["Ada".to_string()];
        let html = create_html_response(None, &names, &[]);
        assert!(html.contains("<div><h2>Recognized Faces:</h2><ul><li>Ada</li></ul></div>"));
    }

    #[test]
    fn test_empty_base64_is_no_image() {
        let html = create_html_response(Some(""), &[], &[]);
        assert!(html.contains("<p>No image to display.</p>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_image_without_faces() {
        let html = create_html_response(Some("QUJD"), &[], &[]);
        assert!(html.contains("<img src='data:image/jpeg;base64,QUJD'/><p>No faces recognized.</p>"));
    }

    #[test]
    fn test_names_are_escaped() {
        let names = vec!["<b>O'Neil & co</b>".to_string()];
        let html = create_html_response(None, &names, &[]);
        assert!(html.contains("<li>&lt;b&gt;O&#39;Neil &amp; co&lt;/b&gt;</li>"));
    }
}
