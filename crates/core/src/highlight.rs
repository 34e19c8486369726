//! Highlight data model
//!
//! Highlights are stored in normalized form only. The pixel-space
//! `ViewportHighlight` is derived per render pass and never kept.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{NormalizedPosition, PageNumber, ViewportPosition};

/// Unique identifier for a highlight
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightId(String);

impl HighlightId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random ID
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HighlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a highlight captured. Fixed when the selection is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    /// Selected text with line breaks collapsed to spaces
    #[serde(rename = "text")]
    Text(String),
    /// `data:image/png;base64,...` snapshot of a dragged region
    #[serde(rename = "image")]
    Area(String),
}

impl Content {
    pub fn is_area(&self) -> bool {
        matches!(self, Content::Area(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Area(_) => None,
        }
    }
}

/// Free-form annotation attached by the host
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(default)]
    pub emoji: String,
}

/// A committed, host-owned highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: HighlightId,
    pub content: Content,
    #[serde(default)]
    pub comment: Comment,
    pub position: NormalizedPosition,
}

/// Uncommitted selection kept visible while the host decides what to do with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostHighlight {
    pub content: Content,
    pub position: NormalizedPosition,
}

/// Anything that carries a normalized position and can be split across pages
pub trait HasPosition: Clone {
    fn position(&self) -> &NormalizedPosition;

    /// Copy of `self` with its position replaced
    fn with_position(&self, position: NormalizedPosition) -> Self;

    fn page_number(&self) -> PageNumber {
        self.position().page_number()
    }
}

impl HasPosition for Highlight {
    fn position(&self) -> &NormalizedPosition {
        &self.position
    }

    fn with_position(&self, position: NormalizedPosition) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

impl HasPosition for GhostHighlight {
    fn position(&self) -> &NormalizedPosition {
        &self.position
    }

    fn with_position(&self, position: NormalizedPosition) -> Self {
        Self {
            position,
            content: self.content.clone(),
        }
    }
}

/// A persistent highlight or the ghost, as fed to the layer renderer
///
/// The ghost has no id and no comment.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerHighlight {
    pub id: Option<HighlightId>,
    pub content: Content,
    pub comment: Option<Comment>,
    pub position: NormalizedPosition,
}

impl LayerHighlight {
    pub fn is_ghost(&self) -> bool {
        self.id.is_none()
    }
}

impl From<&Highlight> for LayerHighlight {
    fn from(highlight: &Highlight) -> Self {
        Self {
            id: Some(highlight.id.clone()),
            content: highlight.content.clone(),
            comment: Some(highlight.comment.clone()),
            position: highlight.position.clone(),
        }
    }
}

impl From<&GhostHighlight> for LayerHighlight {
    fn from(ghost: &GhostHighlight) -> Self {
        Self {
            id: None,
            content: ghost.content.clone(),
            comment: None,
            position: ghost.position.clone(),
        }
    }
}

impl HasPosition for LayerHighlight {
    fn position(&self) -> &NormalizedPosition {
        &self.position
    }

    fn with_position(&self, position: NormalizedPosition) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

/// A highlight converted to pixel space for one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportHighlight {
    pub id: Option<HighlightId>,
    pub content: Content,
    pub comment: Option<Comment>,
    pub position: ViewportPosition,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NormalizedRect;

    fn position(page_number: PageNumber) -> NormalizedPosition {
        let rect = NormalizedRect {
            x1: 10.0,
            y1: 10.0,
            x2: 50.0,
            y2: 20.0,
            width: 600.0,
            height: 800.0,
            page_number,
        };
        NormalizedPosition {
            bounding_rect: rect,
            rects: vec![rect],
            use_pdf_coordinates: None,
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(HighlightId::generate(), HighlightId::generate());
        assert_eq!(HighlightId::new("h-1").as_str(), "h-1");
    }

    #[test]
    fn test_content_json_shape() {
        let text = serde_json::to_value(Content::Text("hello".into())).unwrap();
        assert_eq!(text, serde_json::json!({ "text": "hello" }));

        let area = serde_json::to_value(Content::Area("data:image/png;base64,AA".into())).unwrap();
        assert_eq!(area, serde_json::json!({ "image": "data:image/png;base64,AA" }));
    }

    #[test]
    fn test_highlight_json_uses_camel_case() {
        let highlight = Highlight {
            id: HighlightId::new("h-1"),
            content: Content::Text("hello".into()),
            comment: Comment::default(),
            position: position(2),
        };
        let json = serde_json::to_value(&highlight).unwrap();
        assert_eq!(json["id"], "h-1");
        assert_eq!(json["position"]["boundingRect"]["pageNumber"], 2);

        let parsed: Highlight = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, highlight);
    }

    #[test]
    fn test_ghost_layer_form_has_no_id() {
        let ghost = GhostHighlight {
            content: Content::Text("ghost".into()),
            position: position(1),
        };
        let layer = LayerHighlight::from(&ghost);
        assert!(layer.is_ghost());
        assert!(layer.comment.is_none());
        assert_eq!(layer.page_number(), 1);
    }
}
