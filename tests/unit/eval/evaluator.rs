use super::*;
use crate::scene::model::Operation;
use crate::scene::primitive::{Circle, Plane};

fn circle(cx: f32, cy: f32, r: f32) -> Circle {
    Circle {
        center: Vec2::new(cx, cy),
        radius: r,
    }
}

#[test]
fn scalar_is_a_constant_field() {
    let scene = Scene::default();
    let p = Primitive::Scalar(2.5);
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(0.0, 0.0)), 2.5);
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(-100.0, 42.0)), 2.5);
}

#[test]
fn plane_at_identity_scale_is_exact() {
    let scene = Scene::default();
    let p = Primitive::Plane(Plane::from_point_and_normal(
        Vec2::new(5.0, 0.0),
        Vec2::new(1.0, 0.0),
    ));
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(12.0, 3.0)), 7.0);
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(5.0, -9.0)), 0.0);
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(0.0, 0.0)), -5.0);
}

#[test]
fn plane_keeps_its_line_under_anisotropic_scale() {
    // x = 5 in scene space becomes x = 10 with scale (2, 1).
    let scene = Scene {
        scale: Vec2::new(2.0, 1.0),
        ..Scene::default()
    };
    let p = Primitive::Plane(Plane::from_point_and_normal(
        Vec2::new(5.0, 0.0),
        Vec2::new(1.0, 0.0),
    ));
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(10.0, 7.0)), 0.0);
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(12.0, 7.0)), 2.0);
}

#[test]
fn circle_at_identity_scale_is_euclidean() {
    let scene = Scene::default();
    let p = Primitive::Circle(circle(10.0, 10.0, 5.0));
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(10.0, 10.0)), -5.0);
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(15.0, 10.0)), 0.0);
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(20.0, 10.0)), 5.0);
    assert_eq!(evaluate_primitive(&scene, &p, Vec2::new(13.0, 14.0)), 0.0);
}

#[test]
fn circle_under_subpixel_scale_becomes_an_ellipse() {
    // Scale (3, 1) moves the center to (96, 32) and stretches rx to 36; a
    // sample at the scaled center sits -12 inside (the short radius).
    let scene = Scene {
        scale: Vec2::new(3.0, 1.0),
        ..Scene::default()
    };
    let p = Primitive::Circle(circle(32.0, 32.0, 12.0));
    let d = evaluate_primitive(&scene, &p, Vec2::new(96.0, 32.0));
    assert!((d + 12.0).abs() < 1e-4, "expected -12, got {d}");
}

#[test]
fn empty_object_is_infinitely_far() {
    let scene = Scene::default();
    let object = Object::default();
    assert_eq!(
        evaluate_object(&scene, &object, Vec2::new(0.0, 0.0)),
        f32::INFINITY
    );
}

#[test]
fn object_without_operations_uses_last_primitive() {
    let scene = Scene::default();
    let mut object = Object::default();
    object.push_primitive(3.0f32);
    object.push_primitive(7.0f32);
    assert_eq!(evaluate_object(&scene, &object, Vec2::new(0.0, 0.0)), 7.0);
}

#[test]
fn min_is_union_and_max_is_intersection() {
    let scene = Scene::default();
    let a = Primitive::Circle(circle(0.0, 0.0, 1.0));
    let b = Primitive::Circle(circle(3.0, 0.0, 1.0));

    for point in [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.5, 0.0),
        Vec2::new(3.0, 0.0),
        Vec2::new(-2.0, 2.0),
    ] {
        let da = evaluate_primitive(&scene, &a, point);
        let db = evaluate_primitive(&scene, &b, point);

        let mut union = Object::default();
        let ia = union.push_primitive(a);
        let ib = union.push_primitive(b);
        union.push_operation(Operation::min(ia, ib));
        assert_eq!(evaluate_object(&scene, &union, point), da.min(db));

        let mut intersection = Object::default();
        let ia = intersection.push_primitive(a);
        let ib = intersection.push_primitive(b);
        intersection.push_operation(Operation::max(ia, ib));
        assert_eq!(evaluate_object(&scene, &intersection, point), da.max(db));
    }
}

#[test]
fn double_negation_is_bitwise_identity() {
    let scene = Scene::default();
    let mut object = Object::default();
    let prim = object.push_primitive(circle(1.0, 2.0, 3.0));
    let neg = object.push_operation(Operation::neg(prim));
    object.push_operation(Operation::neg(neg));

    for point in [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 2.0),
        Vec2::new(-7.25, 0.5),
    ] {
        let direct = evaluate_primitive(&scene, &object.primitives[0], point);
        let doubled = evaluate_object(&scene, &object, point);
        assert_eq!(direct.to_bits(), doubled.to_bits());
    }
}

#[test]
fn forward_reference_taints_but_does_not_abort() {
    // op 0 consumes op 1 before it is computed, so op 0 is NaN; op 1 still
    // evaluates and, being last, is the object's value.
    let scene = Scene::default();
    let mut object = Object::default();
    let prim = object.push_primitive(circle(0.0, 0.0, 1.0));
    object.push_operation(Operation::min(ArgIndex::ObjectOperation(1), prim));
    object.push_operation(Operation::neg(prim));

    let point = Vec2::new(3.0, 0.0);
    let d = evaluate_object(&scene, &object, point);
    assert_eq!(d, -2.0);
}

#[test]
fn forward_reference_in_last_operation_yields_nan() {
    let scene = Scene::default();
    let mut object = Object::default();
    object.push_primitive(circle(0.0, 0.0, 1.0));
    object.push_operation(Operation::neg(ArgIndex::ObjectOperation(2)));

    assert!(evaluate_object(&scene, &object, Vec2::new(0.0, 0.0)).is_nan());
}

#[test]
fn self_reference_yields_nan() {
    let scene = Scene::default();
    let mut object = Object::default();
    object.push_operation(Operation::neg(ArgIndex::ObjectOperation(0)));
    assert!(evaluate_object(&scene, &object, Vec2::new(0.0, 0.0)).is_nan());
}

#[test]
fn nan_taint_propagates_through_min_and_max() {
    let scene = Scene::default();
    let mut object = Object::default();
    let prim = object.push_primitive(circle(0.0, 0.0, 1.0));
    let tainted = object.push_operation(Operation::neg(ArgIndex::ObjectOperation(5)));
    object.push_operation(Operation::min(prim, tainted));

    assert!(evaluate_object(&scene, &object, Vec2::new(0.0, 0.0)).is_nan());

    let mut object = Object::default();
    let prim = object.push_primitive(circle(0.0, 0.0, 1.0));
    let tainted = object.push_operation(Operation::neg(ArgIndex::ObjectOperation(5)));
    object.push_operation(Operation::max(tainted, prim));

    assert!(evaluate_object(&scene, &object, Vec2::new(0.0, 0.0)).is_nan());
}

#[test]
fn missing_primitive_yields_nan() {
    let scene = Scene::default();
    let mut object = Object::default();
    object.push_operation(Operation::neg(ArgIndex::ObjectPrimitive(9)));
    assert!(evaluate_object(&scene, &object, Vec2::new(0.0, 0.0)).is_nan());
}

#[test]
fn evaluation_is_deterministic() {
    let scene = Scene::default();
    let mut object = Object::default();
    let a = object.push_primitive(circle(0.3, 0.7, 1.1));
    let b = object.push_primitive(Plane::from_point_and_angle(Vec2::new(0.1, 0.2), 0.37));
    object.push_operation(Operation::min(a, b));

    let point = Vec2::new(0.9, -1.3);
    let first = evaluate_object(&scene, &object, point);
    for _ in 0..8 {
        assert_eq!(
            first.to_bits(),
            evaluate_object(&scene, &object, point).to_bits()
        );
    }
}

#[test]
fn scratch_reuse_matches_fresh_allocation() {
    let scene = Scene::default();
    let mut object = Object::default();
    let a = object.push_primitive(circle(0.0, 0.0, 2.0));
    let b = object.push_primitive(circle(4.0, 0.0, 1.0));
    object.push_operation(Operation::min(a, b));

    let mut scratch = Vec::new();
    for i in 0..5 {
        let point = Vec2::new(i as f32, 0.5);
        assert_eq!(
            evaluate_object(&scene, &object, point).to_bits(),
            evaluate_object_with_scratch(&scene, &object, point, &mut scratch).to_bits()
        );
    }
}
