use crate::foundation::math::Vec2;
use crate::scene::model::{ArgIndex, OpKind, Object, Scene};
use crate::scene::primitive::{Ellipse, Primitive};

/// Signed distance from `point` to a single primitive under the scene scale.
///
/// - Scalars pass through unchanged.
/// - Planes are rebuilt from two scaled points on the line, which keeps the
///   plane's identity under anisotropic scale at the cost of a non-unit
///   effective normal (distances then scale with orientation).
/// - Circles become ellipses with scaled center and radii.
pub fn evaluate_primitive(scene: &Scene, primitive: &Primitive, point: Vec2) -> f32 {
    match primitive {
        Primitive::Scalar(v) => *v,
        Primitive::Plane(plane) => {
            let a = plane.normal * plane.offset;
            let b = a + plane.normal.perp();

            let a = a * scene.scale;
            let b = b * scene.scale;

            let normal = (a - b).perp();
            let offset = a.dot(normal);

            normal.dot(point) - offset
        }
        Primitive::Circle(circle) => Ellipse {
            center: scene.scale * circle.center,
            radius: scene.scale * circle.radius,
        }
        .distance(point),
    }
}

/// Signed distance from `point` to an object's compound field.
///
/// Allocates the per-call result buffer; use
/// [`evaluate_object_with_scratch`] to reuse one on hot paths.
pub fn evaluate_object(scene: &Scene, object: &Object, point: Vec2) -> f32 {
    let mut scratch = Vec::new();
    evaluate_object_with_scratch(scene, object, point, &mut scratch)
}

/// [`evaluate_object`] with a caller-provided result buffer.
///
/// The buffer is cleared and refilled on every call and must not be shared
/// across threads. Evaluation is a single linear sweep over the operation
/// list: no recursion, no early exit, no panic. An argument that names a
/// missing primitive, or an operation at or after the current one, reads
/// NaN and taints its consumers by IEEE rules; that is the defined result
/// for malformed graphs.
pub fn evaluate_object_with_scratch(
    scene: &Scene,
    object: &Object,
    point: Vec2,
    scratch: &mut Vec<f32>,
) -> f32 {
    if object.operations.is_empty() {
        return match object.primitives.last() {
            Some(primitive) => evaluate_primitive(scene, primitive, point),
            None => f32::INFINITY,
        };
    }

    scratch.clear();
    scratch.resize(object.operations.len(), f32::NAN);

    let eval_arg = |results: &[f32], arg: ArgIndex| -> f32 {
        match arg {
            ArgIndex::ObjectPrimitive(i) => match object.primitives.get(i as usize) {
                Some(primitive) => evaluate_primitive(scene, primitive, point),
                None => f32::NAN,
            },
            ArgIndex::ObjectOperation(i) => {
                results.get(i as usize).copied().unwrap_or(f32::NAN)
            }
        }
    };

    for index in 0..object.operations.len() {
        let op = object.operations[index];
        let value = match op.kind {
            OpKind::Min => nan_min(eval_arg(scratch, op.args[0]), eval_arg(scratch, op.args[1])),
            OpKind::Max => nan_max(eval_arg(scratch, op.args[0]), eval_arg(scratch, op.args[1])),
            OpKind::Neg => -eval_arg(scratch, op.args[0]),
        };
        scratch[index] = value;
    }

    scratch[object.operations.len() - 1]
}

// `f32::min`/`f32::max` drop NaN operands; taint has to survive either
// argument position.
fn nan_min(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        f32::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        f32::NAN
    } else {
        a.max(b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
