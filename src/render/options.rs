//! Tunable limits for value formatting

use serde::{Deserialize, Serialize};

/// Limits applied when formatting variables.
///
/// Options can be deserialized from TOML; missing fields take their defaults:
///
/// ```
/// # use tracepage::render::FormatOptions;
/// let options: FormatOptions = toml::from_str("max_line_width = 40").unwrap();
/// assert_eq!(options.max_line_width, 40);
/// assert_eq!(options.pretty_width, 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Lines of a pretty-printed value longer than this many characters are
    /// cut and suffixed with `...`. The default value is `79`.
    #[serde(default = "FormatOptions::default_max_line_width")]
    pub max_line_width: usize,
    /// Column budget for the structured pretty printer. The default value is `80`.
    #[serde(default = "FormatOptions::default_pretty_width")]
    pub pretty_width: usize,
    /// Containers nested deeper than this fail to format and display as `?`.
    #[serde(default = "FormatOptions::default_max_depth")]
    pub max_depth: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_line_width: Self::default_max_line_width(),
            pretty_width: Self::default_pretty_width(),
            max_depth: Self::default_max_depth(),
        }
    }
}

impl FormatOptions {
    fn default_max_line_width() -> usize {
        79
    }

    fn default_pretty_width() -> usize {
        80
    }

    fn default_max_depth() -> usize {
        super::DEFAULT_MAX_DEPTH
    }
}
