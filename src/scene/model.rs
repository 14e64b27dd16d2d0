use crate::foundation::math::Vec2;
use crate::scene::primitive::Primitive;
use serde::{Deserialize, Serialize};

/// Combinator applied to earlier results. Tags are stable on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpKind {
    /// Union of two fields (closest surface wins).
    Min,
    /// Intersection of two fields.
    Max,
    /// Complement of one field.
    Neg,
}

impl OpKind {
    /// Stable on-disk tag (min = 0, max = 1, neg = 2).
    pub fn tag(self) -> u16 {
        match self {
            Self::Min => 0,
            Self::Max => 1,
            Self::Neg => 2,
        }
    }

    /// Reverse of [`OpKind::tag`]; `None` for reserved values.
    pub fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            0 => Some(Self::Min),
            1 => Some(Self::Max),
            2 => Some(Self::Neg),
            _ => None,
        }
    }

    /// Number of meaningful argument slots (2 for min/max, 1 for neg).
    pub fn arity(self) -> u32 {
        match self {
            Self::Min | Self::Max => 2,
            Self::Neg => 1,
        }
    }
}

/// Reference from an operation to one of its argument sources.
///
/// On disk this packs into a single little-endian 32-bit word: the kind in
/// bit 0, the index in the upper 31 bits. The packing is a serialization
/// contract and must not widen without a format version bump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgIndex {
    /// The i-th entry of the enclosing object's primitive list.
    ObjectPrimitive(u32),
    /// The i-th entry of the enclosing object's operation list. Must point
    /// at a *prior* operation, otherwise it evaluates to NaN.
    ObjectOperation(u32),
}

impl ArgIndex {
    /// Pack into the on-disk 32-bit word.
    pub fn pack(self) -> u32 {
        match self {
            Self::ObjectPrimitive(i) => (i & 0x7fff_ffff) << 1,
            Self::ObjectOperation(i) => ((i & 0x7fff_ffff) << 1) | 1,
        }
    }

    /// Unpack from the on-disk 32-bit word.
    pub fn unpack(word: u32) -> Self {
        let index = word >> 1;
        if word & 1 == 0 {
            Self::ObjectPrimitive(index)
        } else {
            Self::ObjectOperation(index)
        }
    }
}

impl Default for ArgIndex {
    fn default() -> Self {
        Self::ObjectPrimitive(0)
    }
}

/// One node of an object's operation list.
///
/// Carries two argument slots; only the first `kind.arity()` are meaningful
/// (and serialized).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Combinator to apply.
    pub kind: OpKind,
    /// Argument slots; slots past the arity are ignored.
    pub args: [ArgIndex; 2],
}

impl Operation {
    /// Union of `a` and `b`.
    pub fn min(a: ArgIndex, b: ArgIndex) -> Self {
        Self {
            kind: OpKind::Min,
            args: [a, b],
        }
    }

    /// Intersection of `a` and `b`.
    pub fn max(a: ArgIndex, b: ArgIndex) -> Self {
        Self {
            kind: OpKind::Max,
            args: [a, b],
        }
    }

    /// Complement of `a`.
    pub fn neg(a: ArgIndex) -> Self {
        Self {
            kind: OpKind::Neg,
            args: [a, ArgIndex::default()],
        }
    }
}

/// A compound shape: primitives combined by a strictly forward-referencing
/// operation list.
///
/// The order of appending fixes the indices that [`ArgIndex`] values refer
/// to. The field of the object is the value of the *last* operation; an
/// object without operations falls back to its last primitive, and an empty
/// object evaluates to `+inf` everywhere.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Primitive pool referenced by `ArgIndex::ObjectPrimitive`.
    pub primitives: Vec<Primitive>,
    /// Topologically ordered combinators over primitives and prior results.
    pub operations: Vec<Operation>,
}

impl Object {
    /// Append a primitive and return the [`ArgIndex`] that refers to it.
    pub fn push_primitive(&mut self, primitive: impl Into<Primitive>) -> ArgIndex {
        let index = self.primitives.len() as u32;
        self.primitives.push(primitive.into());
        ArgIndex::ObjectPrimitive(index)
    }

    /// Append an operation and return the [`ArgIndex`] that refers to it.
    pub fn push_operation(&mut self, operation: Operation) -> ArgIndex {
        let index = self.operations.len() as u32;
        self.operations.push(operation);
        ArgIndex::ObjectOperation(index)
    }
}

/// A list of objects plus a global per-axis scale applied before evaluation.
///
/// The shared primitive list is a forward-compatible part of the on-disk
/// container; evaluation does not consult it. Scale is not serialized in
/// format version 0, so a loaded scene always starts at `(1, 1)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Independent compound shapes.
    pub objects: Vec<Object>,
    /// Reserved shared primitive pool, serialized but unused by evaluation.
    pub primitives: Vec<Primitive>,
    /// Per-axis multiplier applied to primitives before evaluation.
    pub scale: Vec2,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            primitives: Vec::new(),
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
