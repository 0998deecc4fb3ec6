//! Grid configuration.
//!
//! Every field has a default, so a TOML document only needs the keys it
//! changes:
//!
//! ```toml
//! default_row_height = 22
//! selection_mode = "row"
//! grid_lines = "horizontal"
//! grid_line_color = "#c0c0c0"
//! opacity_percent = 80
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_render::Color;

use crate::edit::EditInterrupt;
use crate::error::{GridError, GridResult};
use crate::hit_test::DEFAULT_TOLERANCE;
use crate::paint::{GridLineStyle, ImageStyle, PaintOptions, percent_to_alpha};
use crate::selection::SelectionMode;

/// Colors are written as `#rrggbb` or `#rrggbbaa`.
mod hex_color {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use trellis_render::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| de::Error::custom(format!("invalid color `{s}`")))
    }
}

/// Construction-time settings for a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Height of rows added without an explicit height.
    pub default_row_height: i32,
    /// Width of columns added without an explicit width.
    pub default_column_width: i32,
    pub selection_mode: SelectionMode,
    pub grid_lines: GridLineStyle,
    #[serde(with = "hex_color")]
    pub grid_line_color: Color,
    #[serde(with = "hex_color")]
    pub background_color: Color,
    pub image_style: ImageStyle,
    /// Data cell opacity, 0..=100.
    pub opacity_percent: u8,
    /// Whether cells may be edited in place.
    pub edit_mode: bool,
    /// Whether [`Grid::tooltip_at`](crate::Grid::tooltip_at) reports tips.
    pub tooltips: bool,
    /// Half-width of a resize edge in pixels.
    pub resize_tolerance: i32,
    /// Pixels a visible scroll bar takes from the client area.
    pub scroll_bar_extent: i32,
    pub edit_interrupt: EditInterrupt,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_row_height: 26,
            default_column_width: 36,
            selection_mode: SelectionMode::Cell,
            grid_lines: GridLineStyle::Both,
            grid_line_color: Color::CONTROL_LIGHT,
            background_color: Color::WHITE,
            image_style: ImageStyle::Stretch,
            opacity_percent: 100,
            edit_mode: true,
            tooltips: true,
            resize_tolerance: DEFAULT_TOLERANCE,
            scroll_bar_extent: 16,
            edit_interrupt: EditInterrupt::Cancel,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> GridResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: trellis_core::logging::targets::GRID, path = %path.display(), "grid configuration loaded");
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> GridResult<String> {
        toml::to_string_pretty(self).map_err(|e| GridError::Config(e.to_string()))
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> GridResult<()> {
        if self.opacity_percent > 100 {
            return Err(GridError::Config(format!(
                "opacity_percent must be within 0..=100, got {}",
                self.opacity_percent
            )));
        }
        let non_negative = [
            ("default_row_height", self.default_row_height),
            ("default_column_width", self.default_column_width),
            ("resize_tolerance", self.resize_tolerance),
            ("scroll_bar_extent", self.scroll_bar_extent),
        ];
        for (name, value) in non_negative {
            if value < 0 {
                return Err(GridError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// The display options this configuration starts a grid with.
    pub fn paint_options(&self) -> PaintOptions {
        PaintOptions {
            grid_lines: self.grid_lines,
            grid_line_color: self.grid_line_color,
            background_color: self.background_color,
            background_image: None,
            image_style: self.image_style,
            opacity: percent_to_alpha(self.opacity_percent),
        }
    }

    pub fn with_default_row_height(mut self, height: i32) -> Self {
        self.default_row_height = height;
        self
    }

    pub fn with_default_column_width(mut self, width: i32) -> Self {
        self.default_column_width = width;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_grid_lines(mut self, style: GridLineStyle) -> Self {
        self.grid_lines = style;
        self
    }

    pub fn with_grid_line_color(mut self, color: Color) -> Self {
        self.grid_line_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_opacity_percent(mut self, percent: u8) -> Self {
        self.opacity_percent = percent;
        self
    }

    pub fn with_edit_mode(mut self, enabled: bool) -> Self {
        self.edit_mode = enabled;
        self
    }

    pub fn with_tooltips(mut self, enabled: bool) -> Self {
        self.tooltips = enabled;
        self
    }

    pub fn with_scroll_bar_extent(mut self, extent: i32) -> Self {
        self.scroll_bar_extent = extent;
        self
    }

    pub fn with_edit_interrupt(mut self, policy: EditInterrupt) -> Self {
        self.edit_interrupt = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(GridConfig::from_toml_str("").unwrap(), GridConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = GridConfig::from_toml_str(
            r##"
            default_row_height = 22
            selection_mode = "row"
            grid_lines = "horizontal"
            grid_line_color = "#c0c0c0"
            opacity_percent = 80
            edit_interrupt = "commit"
            "##,
        )
        .unwrap();

        assert_eq!(config.default_row_height, 22);
        assert_eq!(config.default_column_width, 36);
        assert_eq!(config.selection_mode, SelectionMode::Row);
        assert_eq!(config.grid_lines, GridLineStyle::Horizontal);
        assert_eq!(config.grid_line_color, Color::from_rgb8(192, 192, 192));
        assert_eq!(config.edit_interrupt, EditInterrupt::Commit);
        assert_eq!(config.paint_options().opacity, 204);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for doc in [
            "opacity_percent = 150",
            "selection_mode = \"diagonal\"",
            "grid_line_color = \"teal-ish\"",
            "default_row_height = -3",
            "edit_mode = \"yes\"",
        ] {
            let err = GridConfig::from_toml_str(doc).unwrap_err();
            assert!(matches!(err, GridError::Config(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GridConfig::new()
            .with_grid_lines(GridLineStyle::Vertical)
            .with_background_color(Color::from_rgb8(10, 20, 30))
            .with_edit_mode(false);
        let text = config.to_toml_string().unwrap();
        assert_eq!(GridConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = GridConfig::load("/nonexistent/trellis.toml").unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }
}
