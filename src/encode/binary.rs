//! Compact little-endian scene container.
//!
//! Layout (tightly packed, no alignment padding):
//!
//! ```text
//! magic                  4B   ASCII "sdfd"
//! version                2B   currently 0
//! object_count           4B
//! per object:
//!   primitive_count      4B
//!   per primitive:       2B kind tag + variable payload
//!   operation_count      4B
//!   per operation:       2B kind tag + 4B per argument (arity many)
//! scene_primitive_count  4B
//! scene primitives       same encoding as object primitives
//! ```
//!
//! Payloads are IEEE 754 binary32 little-endian: scalar = 4 bytes,
//! plane = 12 bytes (nx, ny, offset), circle = 12 bytes (cx, cy, radius).
//! Scene scale is not part of version 0; loaded scenes start at `(1, 1)`.

use std::path::Path;

use crate::foundation::error::{SdfError, SdfResult};
use crate::foundation::math::Vec2;
use crate::scene::model::{ArgIndex, OpKind, Object, Operation, Scene};
use crate::scene::primitive::{Circle, Plane, Primitive};

/// First four bytes of every scene stream.
pub const MAGIC: [u8; 4] = *b"sdfd";

/// Highest container version this build reads and the one it writes.
pub const VERSION: u16 = 0;

/// Encode a scene into the binary container format.
///
/// Everything except `scale` is written; see the module docs.
pub fn scene_to_bytes(scene: &Scene) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());

    out.extend_from_slice(&(scene.objects.len() as u32).to_le_bytes());
    for object in &scene.objects {
        out.extend_from_slice(&(object.primitives.len() as u32).to_le_bytes());
        for primitive in &object.primitives {
            write_primitive(&mut out, primitive);
        }

        out.extend_from_slice(&(object.operations.len() as u32).to_le_bytes());
        for operation in &object.operations {
            out.extend_from_slice(&operation.kind.tag().to_le_bytes());
            for slot in 0..operation.kind.arity() as usize {
                out.extend_from_slice(&operation.args[slot].pack().to_le_bytes());
            }
        }
    }

    out.extend_from_slice(&(scene.primitives.len() as u32).to_le_bytes());
    for primitive in &scene.primitives {
        write_primitive(&mut out, primitive);
    }

    out
}

/// Decode a scene from the binary container format.
///
/// Any deviation (short stream, bad magic, unsupported version, reserved
/// kind tags) fails with [`SdfError::Format`]; no partial scene is returned.
pub fn scene_from_bytes(bytes: &[u8]) -> SdfResult<Scene> {
    let mut r = Reader { bytes, pos: 0 };

    if r.take(4)? != &MAGIC[..] {
        return Err(SdfError::format("bad magic, not a scene stream"));
    }
    let version = r.u16()?;
    if version > VERSION {
        return Err(SdfError::format(format!(
            "unsupported container version {version} (max {VERSION})"
        )));
    }

    let mut scene = Scene::default();

    let object_count = r.u32()?;
    for _ in 0..object_count {
        let mut object = Object::default();

        let primitive_count = r.u32()?;
        for _ in 0..primitive_count {
            object.primitives.push(read_primitive(&mut r)?);
        }

        let operation_count = r.u32()?;
        for _ in 0..operation_count {
            let tag = r.u16()?;
            let kind = OpKind::from_tag(tag)
                .ok_or_else(|| SdfError::format(format!("unknown operation kind {tag}")))?;
            let mut args = [ArgIndex::default(); 2];
            for slot in args.iter_mut().take(kind.arity() as usize) {
                *slot = ArgIndex::unpack(r.u32()?);
            }
            object.operations.push(Operation { kind, args });
        }

        scene.objects.push(object);
    }

    let scene_primitive_count = r.u32()?;
    for _ in 0..scene_primitive_count {
        scene.primitives.push(read_primitive(&mut r)?);
    }

    Ok(scene)
}

/// Write a scene to a file in the binary container format.
#[tracing::instrument(skip(scene))]
pub fn store_to_file(scene: &Scene, path: impl AsRef<Path> + std::fmt::Debug) -> SdfResult<()> {
    let bytes = scene_to_bytes(scene);
    std::fs::write(path.as_ref(), &bytes)?;
    tracing::debug!(len = bytes.len(), "stored scene");
    Ok(())
}

/// Load a scene from a file in the binary container format.
///
/// The loaded scene always has scale `(1, 1)`; callers using nonuniform
/// scale must reapply it.
#[tracing::instrument]
pub fn load_from_file(path: impl AsRef<Path> + std::fmt::Debug) -> SdfResult<Scene> {
    let bytes = std::fs::read(path.as_ref())?;
    let scene = scene_from_bytes(&bytes)?;
    tracing::debug!(
        objects = scene.objects.len(),
        shared_primitives = scene.primitives.len(),
        "loaded scene"
    );
    Ok(scene)
}

fn write_primitive(out: &mut Vec<u8>, primitive: &Primitive) {
    out.extend_from_slice(&primitive.kind_tag().to_le_bytes());
    match primitive {
        Primitive::Scalar(v) => out.extend_from_slice(&v.to_le_bytes()),
        Primitive::Plane(p) => {
            write_vec2(out, p.normal);
            out.extend_from_slice(&p.offset.to_le_bytes());
        }
        Primitive::Circle(c) => {
            write_vec2(out, c.center);
            out.extend_from_slice(&c.radius.to_le_bytes());
        }
    }
}

fn read_primitive(r: &mut Reader<'_>) -> SdfResult<Primitive> {
    let tag = r.u16()?;
    match tag {
        0 => Ok(Primitive::Scalar(r.f32()?)),
        4 => Ok(Primitive::Plane(Plane {
            normal: read_vec2(r)?,
            offset: r.f32()?,
        })),
        5 => Ok(Primitive::Circle(Circle {
            center: read_vec2(r)?,
            radius: r.f32()?,
        })),
        other => Err(SdfError::format(format!(
            "unknown primitive kind {other}"
        ))),
    }
}

fn write_vec2(out: &mut Vec<u8>, v: Vec2) {
    out.extend_from_slice(&v.x.to_le_bytes());
    out.extend_from_slice(&v.y.to_le_bytes());
}

fn read_vec2(r: &mut Reader<'_>) -> SdfResult<Vec2> {
    Ok(Vec2::new(r.f32()?, r.f32()?))
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> SdfResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| SdfError::format("unexpected end of scene stream"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u16(&mut self) -> SdfResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> SdfResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn f32(&mut self) -> SdfResult<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/binary.rs"]
mod tests;
