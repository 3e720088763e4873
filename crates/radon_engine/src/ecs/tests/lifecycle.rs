use super::{engine, spawn_at, Calls, Probe};
use crate::ecs::ComponentError;
use crate::foundation::math::{Transform, Vec3};
use crate::physics::{BoxCollider, BoxColliderProps, ColliderComponent};
use crate::EngineError;
use crate::scene::SceneGraphHost;

#[test]
fn scene_attached_fires_once_across_frames() {
    let mut engine = engine();
    let node = spawn_at(&mut engine, Vec3::zeros());
    let calls = Calls::default();
    engine.attach::<Probe>(node, calls.clone()).unwrap();

    assert_eq!(calls.attached.get(), 0);
    for _ in 0..5 {
        engine.run_frame_with_delta(0.016);
    }
    assert_eq!(calls.attached.get(), 1);
    assert_eq!(calls.ticks.get(), 5);
}

#[test]
fn unreachable_nodes_are_not_ticked_until_attached_to_the_tree() {
    let mut engine = engine();
    let loose = engine.host_mut().create_node("loose", Transform::default());
    let calls = Calls::default();
    engine.attach::<Probe>(loose, calls.clone()).unwrap();

    engine.run_frame_with_delta(0.1);
    assert_eq!(calls.attached.get(), 0);
    assert_eq!(calls.ticks.get(), 0);

    let host = engine.host_mut();
    let root = host.root();
    assert!(host.add_child(root, loose));
    engine.run_frame_with_delta(0.1);
    engine.run_frame_with_delta(0.1);
    assert_eq!(calls.attached.get(), 1);
    assert_eq!(calls.ticks.get(), 2);

    // Detached again: no ticks, and re-attaching never re-fires the hook
    engine.host_mut().detach(loose);
    engine.run_frame_with_delta(0.1);
    assert_eq!(calls.ticks.get(), 2);
    let host = engine.host_mut();
    let root = host.root();
    assert!(host.add_child(root, loose));
    engine.run_frame_with_delta(0.1);
    assert_eq!(calls.attached.get(), 1);
    assert_eq!(calls.ticks.get(), 3);
}

#[test]
fn last_attachment_of_a_type_wins_lookup() {
    let mut engine = engine();
    let node = spawn_at(&mut engine, Vec3::zeros());
    let first = engine.attach::<Probe>(node, Calls::default()).unwrap();
    let second = engine.attach::<Probe>(node, Calls::default()).unwrap();

    assert_ne!(first, second);
    assert_eq!(engine.world().find::<Probe>(node), Some(second));
    assert_eq!(engine.world().components_of(node).len(), 2);
    // Both still tick
    engine.run_frame_with_delta(0.1);
    assert!(engine.component(first).is_ok());
}

#[test]
fn attach_to_unknown_node_fails() {
    let mut engine = engine();
    let node = spawn_at(&mut engine, Vec3::zeros());
    engine.host_mut().remove_node(node);

    assert!(matches!(
        engine.attach::<Probe>(node, Calls::default()),
        Err(EngineError::Component(ComponentError::NodeNotFound(n))) if n == node
    ));
}

#[test]
fn despawn_destroys_components_and_unregisters_colliders() {
    let mut engine = engine();
    let node = spawn_at(&mut engine, Vec3::zeros());
    let calls = Calls::default();
    let probe = engine.attach::<Probe>(node, calls.clone()).unwrap();
    let collider = engine
        .attach::<BoxCollider>(node, BoxColliderProps::default())
        .unwrap();
    let collider_handle = engine.component(collider).unwrap().handle();
    assert_eq!(engine.physics().len(), 1);

    assert_eq!(engine.despawn(node), 2);
    assert_eq!(calls.destroyed.get(), 1);
    assert!(engine.physics().is_empty());
    assert!(engine.physics().collider(collider_handle).is_none());
    assert_eq!(
        engine.component(probe).err(),
        Some(ComponentError::StaleHandle(probe.key()))
    );
    assert!(engine.world().find::<Probe>(node).is_none());

    // Nothing left to tick on that node
    engine.run_frame_with_delta(0.1);
    assert_eq!(calls.ticks.get(), 0);
    assert_eq!(engine.despawn(node), 0);
}

#[test]
fn frames_follow_the_active_root() {
    let mut engine = engine();
    let old_tree = spawn_at(&mut engine, Vec3::zeros());
    let level = engine.host_mut().create_node("level", Transform::default());
    let old_calls = Calls::default();
    let level_calls = Calls::default();
    engine.attach::<Probe>(old_tree, old_calls.clone()).unwrap();
    engine.attach::<Probe>(level, level_calls.clone()).unwrap();

    engine.run_frame_with_delta(0.1);
    assert!(engine.host_mut().set_root(level));
    engine.run_frame_with_delta(0.1);

    assert_eq!(old_calls.ticks.get(), 1);
    assert_eq!(level_calls.attached.get(), 1);
    assert_eq!(level_calls.ticks.get(), 1);
}
