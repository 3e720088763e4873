use super::{engine, spawn_at};
use crate::foundation::collections::{ColliderHandle, NodeId};
use crate::foundation::math::Vec3;
use crate::physics::{
    BoxCollider, BoxColliderProps, ColliderComponent, SphereCollider, SphereColliderProps,
};
use crate::scene::{SceneGraphHost, SimpleSceneGraph};
use crate::Engine;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Box,
    Sphere,
}

fn collider(
    engine: &mut Engine<SimpleSceneGraph>,
    node: NodeId,
    kind: Kind,
    invert: bool,
) -> ColliderHandle {
    match kind {
        Kind::Box => {
            let props = BoxColliderProps {
                invert,
                ..BoxColliderProps::default()
            };
            let h = engine.attach::<BoxCollider>(node, props).unwrap();
            engine.component(h).unwrap().handle()
        }
        Kind::Sphere => {
            // Unit node scale has length sqrt(3); this gives radius 0.5
            let mut props = SphereColliderProps::new(0.5 / 3.0_f32.sqrt());
            props.invert = invert;
            let h = engine.attach::<SphereCollider>(node, props).unwrap();
            engine.component(h).unwrap().handle()
        }
    }
}

/// Reported overlap between a collider at the origin and one at `distance` on X
fn reported(a: Kind, b: Kind, invert_a: bool, invert_b: bool, distance: f32) -> bool {
    let mut engine = engine();
    let na = spawn_at(&mut engine, Vec3::zeros());
    let nb = spawn_at(&mut engine, Vec3::new(distance, 0.0, 0.0));
    let ha = collider(&mut engine, na, a, invert_a);
    let hb = collider(&mut engine, nb, b, invert_b);

    let hit = engine.find_collision(ha, None).unwrap();
    assert!(hit.is_none() || hit == Some(hb));
    hit.is_some()
}

const PAIRS: [(Kind, Kind); 4] = [
    (Kind::Box, Kind::Box),
    (Kind::Box, Kind::Sphere),
    (Kind::Sphere, Kind::Box),
    (Kind::Sphere, Kind::Sphere),
];

#[test]
fn no_inversion_reports_raw_intersection() {
    for (a, b) in PAIRS {
        assert!(reported(a, b, false, false, 0.5), "{a:?}/{b:?} overlapping");
        assert!(!reported(a, b, false, false, 5.0), "{a:?}/{b:?} apart");
    }
}

#[test]
fn one_inverted_side_negates_intersection() {
    for (a, b) in PAIRS {
        for (ia, ib) in [(true, false), (false, true)] {
            assert!(!reported(a, b, ia, ib, 0.5), "{a:?}/{b:?} {ia}/{ib} overlapping");
            assert!(reported(a, b, ia, ib, 5.0), "{a:?}/{b:?} {ia}/{ib} apart");
        }
    }
}

#[test]
fn two_inverted_sides_cancel_out() {
    for (a, b) in PAIRS {
        assert!(reported(a, b, true, true, 0.5), "{a:?}/{b:?} overlapping");
        assert!(!reported(a, b, true, true, 5.0), "{a:?}/{b:?} apart");
    }
}

#[test]
fn colliders_on_the_same_node_are_never_reported() {
    let mut engine = engine();
    let node = spawn_at(&mut engine, Vec3::zeros());
    let hull = collider(&mut engine, node, Kind::Box, false);
    collider(&mut engine, node, Kind::Sphere, false);
    // Inverted and far from everything else on this node, still skipped
    collider(&mut engine, node, Kind::Box, true);

    assert_eq!(engine.find_collision(hull, None).unwrap(), None);
}

#[test]
fn offset_probes_ahead_without_moving_the_collider() {
    let mut engine = engine();
    let mover = spawn_at(&mut engine, Vec3::zeros());
    let wall = spawn_at(&mut engine, Vec3::new(2.0, 0.0, 0.0));
    let hm = collider(&mut engine, mover, Kind::Sphere, false);
    let hw = collider(&mut engine, wall, Kind::Box, false);

    let step = Vec3::new(1.5, 0.0, 0.0);
    assert_eq!(engine.find_collision(hm, Some(step)).unwrap(), Some(hw));
    assert_eq!(engine.find_collision(hm, None).unwrap(), None);
}

#[test]
fn moved_nodes_need_an_explicit_refresh_to_be_hit() {
    let mut engine = engine();
    let me = spawn_at(&mut engine, Vec3::zeros());
    let other = spawn_at(&mut engine, Vec3::new(10.0, 0.0, 0.0));
    let h = collider(&mut engine, me, Kind::Box, false);
    let ho = collider(&mut engine, other, Kind::Box, false);

    engine.host_mut().local_transform_mut(other).unwrap().position = Vec3::new(0.2, 0.0, 0.0);
    assert_eq!(engine.find_collision(h, None).unwrap(), None);

    engine.update_collider(ho).unwrap();
    assert_eq!(engine.find_collision(h, None).unwrap(), Some(ho));
}

#[test]
fn box_size_follows_node_scale_and_factor() {
    let mut engine = engine();
    let big = spawn_at(&mut engine, Vec3::zeros());
    engine.host_mut().local_transform_mut(big).unwrap().scale = Vec3::new(4.0, 1.0, 1.0);
    let probe = spawn_at(&mut engine, Vec3::new(2.4, 0.0, 0.0));

    let hb = engine
        .attach::<BoxCollider>(big, BoxColliderProps::default())
        .unwrap();
    let hb = engine.component(hb).unwrap().handle();
    let hp = collider(&mut engine, probe, Kind::Box, false);

    // Half-extent along X is 4 * 1 * 0.5 = 2, probe reaches down to 1.9
    assert_eq!(engine.find_collision(hb, None).unwrap(), Some(hp));
}
