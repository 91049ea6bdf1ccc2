//! Application configuration.

use canopy_core::geometry::RASTER_RESOLUTION;
use canopy_render::POSTER_SIZE;

/// Settings for one run of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub title: String,
    /// Edge length of the editor's backing raster.
    pub resolution: u32,
    /// Edge length of exported posters.
    pub poster_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Canopy".to_string(),
            resolution: RASTER_RESOLUTION,
            poster_size: POSTER_SIZE,
        }
    }
}
