//! Tunables for the highlighter
//!
//! Every field has a default, so a host only needs to supply the values it
//! wants to change. Durations are read from JSON as milliseconds.

use serde::{Deserialize, Deserializer};
use std::time::Duration;

use crate::error::{HighlighterResult, IntegrationError};
use crate::geometry::LineMergeMargins;
use crate::scale::ScaleValue;

/// Configuration for selection capture, tips and autoscroll
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlighterConfig {
    /// Quiet period before a native text selection becomes a candidate
    #[serde(rename = "selectionDebounceMs", deserialize_with = "millis")]
    pub selection_debounce: Duration,

    /// Quiet period after a container resize before the scale is re-applied
    #[serde(rename = "scaleDebounceMs", deserialize_with = "millis")]
    pub scale_debounce: Duration,

    /// Time after a programmatic scroll during which scroll events are ignored
    #[serde(rename = "autoscrollSettleMs", deserialize_with = "millis")]
    pub autoscroll_settle: Duration,

    /// Pixels left above a highlight when scrolling to it
    pub scroll_margin: f64,

    /// Gap between a highlight and its tip
    pub tip_padding: f64,

    pub line_merge_y_margin: f64,
    pub line_merge_x_margin: f64,

    /// Horizontal slack around a hover tip before it is dismissed
    pub hover_padding_x: f64,
    /// Vertical slack around a hover tip before it is dismissed
    pub hover_padding_y: f64,

    /// Scale applied on initialization and after resizes
    pub scale_value: ScaleValue,
}

impl Default for HighlighterConfig {
    fn default() -> Self {
        Self {
            selection_debounce: Duration::from_millis(250),
            scale_debounce: Duration::from_millis(500),
            autoscroll_settle: Duration::from_millis(100),
            scroll_margin: 10.0,
            tip_padding: 5.0,
            line_merge_y_margin: 5.0,
            line_merge_x_margin: 10.0,
            hover_padding_x: 60.0,
            hover_padding_y: 30.0,
            scale_value: ScaleValue::Auto,
        }
    }
}

impl HighlighterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json_str(json: &str) -> HighlighterResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the text selection debounce window
    pub fn with_selection_debounce(mut self, debounce: Duration) -> Self {
        self.selection_debounce = debounce;
        self
    }

    /// Set the resize debounce window
    pub fn with_scale_debounce(mut self, debounce: Duration) -> Self {
        self.scale_debounce = debounce;
        self
    }

    /// Set the autoscroll settle window
    pub fn with_autoscroll_settle(mut self, settle: Duration) -> Self {
        self.autoscroll_settle = settle;
        self
    }

    pub fn with_scroll_margin(mut self, margin: f64) -> Self {
        self.scroll_margin = margin;
        self
    }

    pub fn with_tip_padding(mut self, padding: f64) -> Self {
        self.tip_padding = padding;
        self
    }

    pub fn with_scale_value(mut self, scale: ScaleValue) -> Self {
        self.scale_value = scale;
        self
    }

    /// Margins for joining text fragments into lines
    pub fn line_merge_margins(&self) -> LineMergeMargins {
        LineMergeMargins {
            y: self.line_merge_y_margin,
            x: self.line_merge_x_margin,
        }
    }

    /// Reject negative or non-finite pixel values
    pub fn validate(&self) -> Result<(), IntegrationError> {
        let pixels = [
            ("scrollMargin", self.scroll_margin),
            ("tipPadding", self.tip_padding),
            ("lineMergeYMargin", self.line_merge_y_margin),
            ("lineMergeXMargin", self.line_merge_x_margin),
            ("hoverPaddingX", self.hover_padding_x),
            ("hoverPaddingY", self.hover_padding_y),
        ];

        for (name, value) in pixels {
            if !value.is_finite() || value < 0.0 {
                return Err(IntegrationError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

fn millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}
