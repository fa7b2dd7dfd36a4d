use facetag_core::{ARCFACE_MODEL_FILE, DEFAULT_TOLERANCE, SCRFD_MODEL_FILE};
use facetag_render::DEFAULT_JPEG_QUALITY;
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration, loaded from environment variables and then
/// overridden by command-line flags.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the ONNX model files.
    pub model_dir: PathBuf,
    /// Maximum Euclidean distance for a match.
    pub tolerance: f32,
    /// Font used for face labels (system fonts are tried when unset).
    pub font_path: Option<PathBuf>,
    /// JPEG quality of the embedded image (1-100).
    pub jpeg_quality: u8,
}

impl Config {
    /// Load configuration from `FACETAG_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            model_dir: lookup("FACETAG_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(facetag_core::default_model_dir),
            tolerance: parse_var(&lookup, "FACETAG_TOLERANCE").unwrap_or(DEFAULT_TOLERANCE),
            font_path: lookup("FACETAG_FONT").filter(|v| !v.is_empty()).map(PathBuf::from),
            jpeg_quality: parse_var(&lookup, "FACETAG_JPEG_QUALITY")
                .filter(|q| (1..=100).contains(q))
                .unwrap_or(DEFAULT_JPEG_QUALITY),
        }
    }

    /// Path to the SCRFD detection model.
    pub fn scrfd_model_path(&self) -> PathBuf {
        self.model_dir.join(SCRFD_MODEL_FILE)
    }

    /// Path to the ArcFace recognition model.
    pub fn arcface_model_path(&self) -> PathBuf {
        self.model_dir.join(ARCFACE_MODEL_FILE)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
        assert!(config.font_path.is_none());
        assert!(config.model_dir.ends_with("facetag/models"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FACETAG_MODEL_DIR", "/opt/models"),
            ("FACETAG_TOLERANCE", " 0.6 "),
            ("FACETAG_FONT", "/fonts/a.ttf"),
            ("FACETAG_JPEG_QUALITY", "90"),
        ]);
        assert_eq!(config.tolerance, 0.6);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/a.ttf")));
        assert_eq!(config.scrfd_model_path(), PathBuf::from("/opt/models/det_10g.onnx"));
        assert_eq!(config.arcface_model_path(), PathBuf::from("/opt/models/w600k_r50.onnx"));
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = config_from(&[("FACETAG_TOLERANCE", "loose"), ("FACETAG_JPEG_QUALITY", "999")]);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn test_out_of_range_jpeg_quality_falls_back() {
        for bad in ["0", "101"] {
            let config = config_from(&[("FACETAG_JPEG_QUALITY", bad)]);
            assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY, "FACETAG_JPEG_QUALITY={bad}");
        }
        assert_eq!(config_from(&[("FACETAG_JPEG_QUALITY", "1")]).jpeg_quality, 1);
        assert_eq!(config_from(&[("FACETAG_JPEG_QUALITY", "100")]).jpeg_quality, 100);
    }
}
