//! Render State Records
//!
//! Fixed-function state an instance is drawn with. Like spatial transforms,
//! render states stream: there is no finalize phase and updates are accepted
//! for the record's whole lifetime, so UI toggles can flip depth or blend
//! settings frame to frame without rebuilding geometry.

/// Framebuffer blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Opaque,
    Alpha,
    Additive,
}

/// A render-state resource record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStateRecord {
    pub depth_test: bool,
    pub depth_write: bool,
    pub line_width: f32,
    pub blend: BlendMode,
}

impl Default for RenderStateRecord {
    fn default() -> Self {
        Self {
            depth_test: true,
            depth_write: true,
            line_width: 1.0,
            blend: BlendMode::Opaque,
        }
    }
}

impl RenderStateRecord {
    /// State for alpha-blended geometry: tested against depth but not
    /// written, so translucent layers composite in submission order.
    #[must_use]
    pub fn translucent() -> Self {
        Self {
            depth_write: false,
            blend: BlendMode::Alpha,
            ..Self::default()
        }
    }

    /// State for line decorations with an explicit width.
    #[must_use]
    pub fn lines(line_width: f32) -> Self {
        Self {
            line_width,
            ..Self::default()
        }
    }
}
