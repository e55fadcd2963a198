//! Geometry Data Records
//!
//! A geometry-data record holds the CPU-side vertex and index buffers for
//! one piece of geometry, one planar byte buffer per declared attribute.
//! Records follow a two-phase lifecycle: after creation the buffers are
//! populated by byte-range updates, then `finalize` freezes them so the
//! backend can build immutable GPU buffers once. Spatial transforms and
//! render states stream forever; geometry data deliberately does not.

use bitflags::bitflags;

use crate::errors::{ResourceKind, Result, SceneError};

/// One vertex attribute stream of a geometry-data record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    Normal,
    Color,
    Texcoord,
}

impl VertexAttribute {
    /// Byte stride of one element of this attribute.
    ///
    /// Position and normal are `[f32; 3]`, color is `[f32; 4]`,
    /// texcoord is `[f32; 2]`.
    #[must_use]
    pub fn stride(self) -> u64 {
        match self {
            VertexAttribute::Position | VertexAttribute::Normal => 12,
            VertexAttribute::Color => 16,
            VertexAttribute::Texcoord => 8,
        }
    }

    fn flag(self) -> AttributeSet {
        match self {
            VertexAttribute::Position => AttributeSet::POSITION,
            VertexAttribute::Normal => AttributeSet::NORMAL,
            VertexAttribute::Color => AttributeSet::COLOR,
            VertexAttribute::Texcoord => AttributeSet::TEXCOORD,
        }
    }
}

bitflags! {
    /// The set of vertex attributes a geometry-data record declares.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttributeSet: u8 {
        const POSITION = 1 << 0;
        const NORMAL   = 1 << 1;
        const COLOR    = 1 << 2;
        const TEXCOORD = 1 << 3;
    }
}

/// Byte stride of one index (`u32`).
pub const INDEX_STRIDE: u64 = 4;

/// Creation parameters for a geometry-data record.
#[derive(Debug, Clone, Copy)]
pub struct GeometryDataDescriptor {
    pub vertex_count: u32,
    pub index_count: u32,
    pub attributes: AttributeSet,
}

impl GeometryDataDescriptor {
    /// Rejects internally inconsistent descriptors.
    ///
    /// Cross-resource checks (index values vs. vertex count, counts vs.
    /// primitive topology) belong to the backend at draw time, not here.
    pub fn validate(&self) -> Result<()> {
        if self.vertex_count == 0 && self.index_count > 0 {
            return Err(SceneError::InvalidDescriptor(
                "nonzero index count with zero vertices".into(),
            ));
        }
        if self.vertex_count > 0 && self.attributes.is_empty() {
            return Err(SceneError::InvalidDescriptor(
                "vertices declared without any attributes".into(),
            ));
        }
        if !self.attributes.is_empty() && !self.attributes.contains(AttributeSet::POSITION) {
            return Err(SceneError::InvalidDescriptor(
                "attribute set lacks position".into(),
            ));
        }
        Ok(())
    }
}

/// A geometry-data resource record.
///
/// Owned exclusively by the geometry-data table; referenced read-only by any
/// number of instances.
#[derive(Debug)]
pub struct GeometryDataRecord {
    vertex_count: u32,
    index_count: u32,
    attributes: AttributeSet,
    positions: Vec<u8>,
    normals: Vec<u8>,
    colors: Vec<u8>,
    texcoords: Vec<u8>,
    indices: Vec<u8>,
    finalized: bool,
}

impl GeometryDataRecord {
    /// Builds a zero-filled record sized by the (validated) descriptor.
    #[must_use]
    pub fn new(desc: &GeometryDataDescriptor) -> Self {
        let attr_len = |attr: VertexAttribute| {
            if desc.attributes.contains(attr.flag()) {
                (u64::from(desc.vertex_count) * attr.stride()) as usize
            } else {
                0
            }
        };
        Self {
            vertex_count: desc.vertex_count,
            index_count: desc.index_count,
            attributes: desc.attributes,
            positions: vec![0; attr_len(VertexAttribute::Position)],
            normals: vec![0; attr_len(VertexAttribute::Normal)],
            colors: vec![0; attr_len(VertexAttribute::Color)],
            texcoords: vec![0; attr_len(VertexAttribute::Texcoord)],
            indices: vec![0; (u64::from(desc.index_count) * INDEX_STRIDE) as usize],
            finalized: false,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        self.attributes
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Raw bytes of one attribute stream, or `None` if it was not declared.
    #[must_use]
    pub fn attribute_bytes(&self, attr: VertexAttribute) -> Option<&[u8]> {
        if !self.attributes.contains(attr.flag()) {
            return None;
        }
        Some(match attr {
            VertexAttribute::Position => &self.positions,
            VertexAttribute::Normal => &self.normals,
            VertexAttribute::Color => &self.colors,
            VertexAttribute::Texcoord => &self.texcoords,
        })
    }

    /// Raw index bytes (`u32` little-endian, host order via bytemuck casts).
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        &self.indices
    }

    /// Writes `bytes` into one attribute stream at `byte_offset`.
    pub fn update_attribute(
        &mut self,
        attr: VertexAttribute,
        byte_offset: u64,
        bytes: &[u8],
    ) -> Result<()> {
        if self.finalized {
            return Err(SceneError::AlreadyFinalized {
                kind: ResourceKind::GeometryData,
            });
        }
        if !self.attributes.contains(attr.flag()) {
            return Err(SceneError::InvalidDescriptor(format!(
                "update of undeclared attribute {attr:?}"
            )));
        }
        let target = match attr {
            VertexAttribute::Position => &mut self.positions,
            VertexAttribute::Normal => &mut self.normals,
            VertexAttribute::Color => &mut self.colors,
            VertexAttribute::Texcoord => &mut self.texcoords,
        };
        write_region(target, byte_offset, bytes)
    }

    /// Writes `bytes` into the index buffer at `byte_offset`.
    pub fn update_indices(&mut self, byte_offset: u64, bytes: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(SceneError::AlreadyFinalized {
                kind: ResourceKind::GeometryData,
            });
        }
        write_region(&mut self.indices, byte_offset, bytes)
    }

    /// One-way transition from "being populated" to "ready for binding".
    pub fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Err(SceneError::AlreadyFinalized {
                kind: ResourceKind::GeometryData,
            });
        }
        self.finalized = true;
        Ok(())
    }
}

fn write_region(target: &mut [u8], byte_offset: u64, bytes: &[u8]) -> Result<()> {
    let extent = target.len() as u64;
    let len = bytes.len() as u64;
    let Some(end) = byte_offset.checked_add(len) else {
        return Err(SceneError::OutOfBounds {
            offset: byte_offset,
            len,
            extent,
        });
    };
    if end > extent {
        return Err(SceneError::OutOfBounds {
            offset: byte_offset,
            len,
            extent,
        });
    }
    target[byte_offset as usize..end as usize].copy_from_slice(bytes);
    Ok(())
}
