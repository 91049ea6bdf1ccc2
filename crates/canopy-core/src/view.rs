//! View modes of a drawing surface and the design flow steps that pick them.

use serde::{Deserialize, Serialize};

/// Whether a drawing surface accepts input or only replays a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Pointer input paints into the raster.
    Interactive,
    /// The last snapshot is shown as-is; input is ignored.
    #[default]
    Replay,
}

impl ViewMode {
    pub fn accepts_input(self) -> bool {
        self == ViewMode::Interactive
    }
}

/// Steps of the design flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignStep {
    /// Pick fill color and pattern.
    #[default]
    Design,
    /// Paint on the canopy.
    Paint,
    /// Preview and export the poster.
    Share,
}

impl DesignStep {
    /// Only the paint step makes the surface interactive.
    pub fn view_mode(self) -> ViewMode {
        match self {
            DesignStep::Paint => ViewMode::Interactive,
            DesignStep::Design | DesignStep::Share => ViewMode::Replay,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DesignStep::Design => "design",
            DesignStep::Paint => "paint",
            DesignStep::Share => "share",
        }
    }
}
