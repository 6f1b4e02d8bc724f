//! Project triangle model
//!
//! Three corners, at most two selected at once. The board shown on the
//! triangle page is transient per-view state; the room only carries the
//! default corner set it was created with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Corner positions in their fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CornerId {
    Top,
    BottomLeft,
    BottomRight,
}

impl CornerId {
    /// Fixed iteration order; displacement on over-selection follows this
    /// order, not click order.
    pub const ALL: [CornerId; 3] = [CornerId::Top, CornerId::BottomLeft, CornerId::BottomRight];

    pub fn display_name(self) -> &'static str {
        match self {
            CornerId::Top => "top",
            CornerId::BottomLeft => "bottom-left",
            CornerId::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for CornerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CornerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(CornerId::Top),
            "bottom-left" | "bottomleft" | "left" => Ok(CornerId::BottomLeft),
            "bottom-right" | "bottomright" | "right" => Ok(CornerId::BottomRight),
            other => Err(Error::UnknownCorner(other.to_string())),
        }
    }
}

/// One triangle corner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleCorner {
    pub label: String,
    pub selected: bool,
}

impl TriangleCorner {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selected: false,
        }
    }
}

/// The three corners of the triangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleCorners {
    pub top: TriangleCorner,
    pub bottom_left: TriangleCorner,
    pub bottom_right: TriangleCorner,
}

impl TriangleCorners {
    pub const DEFAULT_LABELS: [&'static str; 3] = ["Fast", "Quality", "Cheap"];

    pub fn new(
        top: impl Into<String>,
        bottom_left: impl Into<String>,
        bottom_right: impl Into<String>,
    ) -> Self {
        Self {
            top: TriangleCorner::new(top),
            bottom_left: TriangleCorner::new(bottom_left),
            bottom_right: TriangleCorner::new(bottom_right),
        }
    }

    pub fn corner(&self, id: CornerId) -> &TriangleCorner {
        match id {
            CornerId::Top => &self.top,
            CornerId::BottomLeft => &self.bottom_left,
            CornerId::BottomRight => &self.bottom_right,
        }
    }

    pub fn corner_mut(&mut self, id: CornerId) -> &mut TriangleCorner {
        match id {
            CornerId::Top => &mut self.top,
            CornerId::BottomLeft => &mut self.bottom_left,
            CornerId::BottomRight => &mut self.bottom_right,
        }
    }

    /// Selected corners in fixed order
    pub fn selected(&self) -> Vec<CornerId> {
        CornerId::ALL
            .into_iter()
            .filter(|id| self.corner(*id).selected)
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected().len()
    }

    /// Toggle a corner, holding the at-most-two invariant: selecting a
    /// third corner first deselects whichever selected corner comes first
    /// in the fixed order.
    pub fn toggle(&mut self, id: CornerId) {
        if !self.corner(id).selected && self.selected_count() == 2 {
            if let Some(first) = self.selected().first().copied() {
                self.corner_mut(first).selected = false;
            }
        }

        let corner = self.corner_mut(id);
        corner.selected = !corner.selected;

        debug_assert!(self.selected_count() <= 2);
    }

    pub fn set_label(&mut self, id: CornerId, label: impl Into<String>) {
        self.corner_mut(id).label = label.into();
    }

    /// "Fast + Quality"-style summary; only meaningful with a full pair
    pub fn selection_summary(&self) -> Option<String> {
        let selected = self.selected();
        if selected.len() == 2 {
            Some(
                selected
                    .iter()
                    .map(|id| self.corner(*id).label.as_str())
                    .collect::<Vec<_>>()
                    .join(" + "),
            )
        } else {
            None
        }
    }
}

impl Default for TriangleCorners {
    fn default() -> Self {
        let [top, left, right] = Self::DEFAULT_LABELS;
        Self::new(top, left, right)
    }
}

/// Triangle operating mode. Only `Standard` is ever produced; a shared
/// voting mode is declared for forward compatibility but has no operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriangleMode {
    #[default]
    Standard,
    Voting,
}

/// Triangle state carried on a room. Created with defaults; per-view board
/// edits are not mirrored back into the room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleState {
    pub corners: TriangleCorners,
    pub mode: TriangleMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_corners() {
        let corners = TriangleCorners::default();
        assert_eq!(corners.top.label, "Fast");
        assert_eq!(corners.bottom_left.label, "Quality");
        assert_eq!(corners.bottom_right.label, "Cheap");
        assert_eq!(corners.selected_count(), 0);
    }

    #[test]
    fn test_toggle_on_and_off() {
        let mut corners = TriangleCorners::default();

        corners.toggle(CornerId::Top);
        assert!(corners.top.selected);

        corners.toggle(CornerId::Top);
        assert!(!corners.top.selected);
    }

    #[test]
    fn test_third_selection_displaces_first_in_fixed_order() {
        let mut corners = TriangleCorners::default();

        // Select in click order: bottom-right, then top
        corners.toggle(CornerId::BottomRight);
        corners.toggle(CornerId::Top);
        assert_eq!(corners.selected(), vec![CornerId::Top, CornerId::BottomRight]);

        // Selecting the third drops top (first in fixed order), not
        // bottom-right (first clicked)
        corners.toggle(CornerId::BottomLeft);
        assert_eq!(
            corners.selected(),
            vec![CornerId::BottomLeft, CornerId::BottomRight]
        );
        assert_eq!(corners.selected_count(), 2);
    }

    #[test]
    fn test_selection_summary_requires_pair() {
        let mut corners = TriangleCorners::default();
        assert_eq!(corners.selection_summary(), None);

        corners.toggle(CornerId::Top);
        assert_eq!(corners.selection_summary(), None);

        corners.toggle(CornerId::BottomLeft);
        assert_eq!(corners.selection_summary().as_deref(), Some("Fast + Quality"));
    }

    #[test]
    fn test_set_label() {
        let mut corners = TriangleCorners::default();
        corners.set_label(CornerId::BottomRight, "Scope");
        assert_eq!(corners.bottom_right.label, "Scope");
    }

    #[test]
    fn test_corner_id_parsing() {
        assert_eq!("top".parse::<CornerId>().unwrap(), CornerId::Top);
        assert_eq!("left".parse::<CornerId>().unwrap(), CornerId::BottomLeft);
        assert_eq!(
            "bottom-right".parse::<CornerId>().unwrap(),
            CornerId::BottomRight
        );
        assert!("middle".parse::<CornerId>().is_err());
    }
}
