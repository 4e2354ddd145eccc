//! Request parameter parsing.
//!
//! These structs describe *what* the pipeline should do with an upload. They
//! are derived entirely from the form fields of the request and never fail:
//! missing or invalid values fall back to defaults.
//!
//! ## Fields
//!
//! | Field | Meaning | Default |
//! |---|---|---|
//! | `w` | maximum thumbnail width | 200 |
//! | `h` | maximum thumbnail height | 200 |
//! | `interp` | interpolation algorithm, case-insensitive | `NearestNeighbor` |
//! | `jpeg` | JPEG quality; outside 0..=100 selects PNG | 90 |

use std::collections::HashMap;

use crate::decode::Interpolation;
use crate::encode::OutputFormat;

pub const WIDTH_FIELD: &str = "w";
pub const HEIGHT_FIELD: &str = "h";
pub const INTERP_FIELD: &str = "interp";
pub const QUALITY_FIELD: &str = "jpeg";

pub const DEFAULT_MAX_WIDTH: u32 = 200;
pub const DEFAULT_MAX_HEIGHT: u32 = 200;
pub const DEFAULT_QUALITY: u8 = 90;

/// Form fields of an upload, keyed by field name.
pub type Params = HashMap<String, String>;

/// Bounds and algorithm for the resize stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    pub max_width: u32,
    pub max_height: u32,
    /// `None` when the request named an algorithm that does not exist.
    /// The image is then left at its decoded size.
    pub interpolation: Option<Interpolation>,
}

impl Default for ResizeSpec {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            interpolation: Some(Interpolation::default()),
        }
    }
}

impl ResizeSpec {
    pub fn from_params(params: &Params) -> Self {
        Self {
            max_width: parse_dimension(field(params, WIDTH_FIELD), DEFAULT_MAX_WIDTH),
            max_height: parse_dimension(field(params, HEIGHT_FIELD), DEFAULT_MAX_HEIGHT),
            interpolation: parse_interpolation(field(params, INTERP_FIELD)),
        }
    }
}

/// Output format negotiated from the `jpeg` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSpec {
    pub format: OutputFormat,
}

impl Default for EncodeSpec {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg {
                quality: DEFAULT_QUALITY,
            },
        }
    }
}

impl EncodeSpec {
    pub fn from_params(params: &Params) -> Self {
        Self::from_quality_param(field(params, QUALITY_FIELD))
    }

    /// Negotiate the output format from a raw quality value.
    ///
    /// Absent or empty selects JPEG at the default quality. A value inside
    /// `0..=100` selects JPEG at that quality; anything else, including text
    /// that is not an integer, selects PNG.
    pub fn from_quality_param(value: Option<&str>) -> Self {
        let value = match value.map(str::trim) {
            None | Some("") => return Self::default(),
            Some(value) => value,
        };

        let format = match value.parse::<i64>() {
            Ok(quality @ 0..=100) => OutputFormat::Jpeg {
                quality: quality as u8,
            },
            _ => OutputFormat::Png,
        };
        Self { format }
    }
}

fn field<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str)
}

/// Parse an unsigned dimension, silently falling back to `default`.
pub fn parse_dimension(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// Resolve the `interp` field.
///
/// Empty or absent selects the default algorithm. A non-empty name that is not
/// recognized yields `None`, which disables resizing.
pub fn parse_interpolation(value: Option<&str>) -> Option<Interpolation> {
    match value {
        None | Some("") => Some(Interpolation::default()),
        Some(name) => Interpolation::from_name(name),
    }
}
