//! Appearance Records
//!
//! An appearance selects which shader template an instance is drawn with and
//! optionally references a texture owned by the external renderer. Texture
//! loading itself is an external collaborator; only the opaque id crosses
//! this layer.

use crate::renderer::backend::TextureId;

/// Shader template selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderTemplate {
    /// Uniform flat color.
    #[default]
    Flat,
    /// Per-vertex color attribute.
    VertexColor,
    /// Normal-based lighting.
    Lit,
    /// Texcoord-sampled texture.
    Textured,
}

/// An appearance resource record.
///
/// No finalize phase exists for appearances; updates stream for the
/// record's whole lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppearanceRecord {
    pub template: ShaderTemplate,
    pub texture: Option<TextureId>,
}

impl AppearanceRecord {
    #[must_use]
    pub fn new(template: ShaderTemplate) -> Self {
        Self {
            template,
            texture: None,
        }
    }

    #[must_use]
    pub fn with_texture(template: ShaderTemplate, texture: TextureId) -> Self {
        Self {
            template,
            texture: Some(texture),
        }
    }
}
