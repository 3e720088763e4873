//! Headless sandbox
//!
//! Builds a small arena, drives a rover around it with scripted keyboard
//! input and keeps it glued to a rasterized hill. Pass a `.toml` or `.ron`
//! engine config path as the first argument to override the defaults.

use std::collections::HashMap;
use std::sync::Arc;

use radon_engine::assets::{encode_bhm, AssetError};
use radon_engine::ecs::components::AnimationClip;
use radon_engine::foundation::logging;
use radon_engine::prelude::*;

const FRAME_DELTA: f32 = 1.0 / 60.0;
const FRAMES: u32 = 240;
const ROVER_SPEED: f32 = 3.0;

/// Asset host serving generated files from memory
#[derive(Default)]
struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
}

impl AssetHost for MemoryAssets {
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

/// Props for [`RoverController`]
struct RoverProps {
    movement: MappingHandle,
    hull: ColliderHandle,
}

/// Drives its node from the movement mapping, refusing steps that collide
struct RoverController {
    movement: MappingHandle,
    hull: ColliderHandle,
    blocked_steps: u32,
}

impl ComponentInit for RoverController {
    type Props = RoverProps;

    fn init(props: RoverProps, _ctx: &mut ComponentContext<'_>) -> Self {
        Self {
            movement: props.movement,
            hull: props.hull,
            blocked_steps: 0,
        }
    }
}

impl Component for RoverController {
    fn on_scene_attached(&mut self, ctx: &mut ComponentContext<'_>) {
        log::info!("Rover live at {:?}", ctx.world_position());
    }

    fn on_tick(&mut self, ctx: &mut ComponentContext<'_>, delta: f32) {
        let x = ctx.input.value(self.movement, "horizontal");
        let z = ctx.input.value(self.movement, "vertical");
        if x.abs() + z.abs() < f32::EPSILON {
            return;
        }
        let step = Vec3::new(x, 0.0, -z) * ROVER_SPEED * delta;
        match ctx.physics.find_collision(self.hull, &*ctx.scene, Some(step)) {
            Ok(None) => {
                if let Some(transform) = ctx.transform_mut() {
                    transform.position += step;
                }
            }
            Ok(Some(hit)) => {
                self.blocked_steps += 1;
                log::debug!("Rover blocked by {hit:?}");
            }
            Err(e) => log::warn!("Rover collision query failed: {e}"),
        }
    }
}

fn movement_mapping() -> InputMappingDef {
    InputMappingDef::named("movement")
        .axis(
            AxisDef::new("horizontal")
                .with_gamepad_axis(0, false)
                .with_keys(["a", "arrowleft"], ["d", "arrowright"]),
        )
        .axis(
            AxisDef::new("vertical")
                .with_gamepad_axis(1, true)
                .with_keys(["s", "arrowdown"], ["w", "arrowup"]),
        )
}

/// A smooth hill in model space, sampled on a regular grid
fn hill_points(resolution: u16) -> Vec<Vec3> {
    let step = 2.0 / f32::from(resolution);
    let mut points = Vec::new();
    for i in 0..=resolution {
        for j in 0..=resolution {
            let x = f32::from(i).mul_add(step, -1.0);
            let z = f32::from(j).mul_add(step, -1.0);
            let y = (1.0 - x.mul_add(x, z * z)).max(0.0);
            points.push(Vec3::new(x, y, z));
        }
    }
    points
}

/// Scripted key events for a frame
fn script(frame: u32) -> Vec<InputEvent> {
    match frame {
        0 => vec![InputEvent::KeyDown("D".into())],
        60 => vec![InputEvent::KeyUp("d".into()), InputEvent::KeyDown("w".into())],
        120 => vec![InputEvent::FocusLost],
        150 => vec![InputEvent::KeyDown("ArrowRight".into())],
        200 => vec![InputEvent::KeyUp("ArrowRight".into())],
        _ => Vec::new(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default().with_mapping(movement_mapping()),
    };
    logging::init_with_filter(&config.logging.filter);
    log::info!("Starting sandbox...");

    let mut engine = Engine::with_config(SimpleSceneGraph::new(), &config);
    let movement = match engine.configured_mappings().first() {
        Some(&handle) => handle,
        None => engine.input_mut().create_mapping(movement_mapping()),
    };

    // Terrain: rasterize a hill, ship it through the BHM format and load it back
    let mut assets = MemoryAssets::default();
    let hill = Heightfield::rasterize(&hill_points(32), 64);
    assets.files.insert("hill.bhm".into(), encode_bhm(&hill)?);
    let heightmap: SharedHeightfield = Arc::new(load_bhm(&assets, "hill.bhm")?);

    let host = engine.host_mut();
    let root = host.root();
    let terrain = host.spawn(root, "terrain", Transform::default());
    let arena = host.spawn(
        root,
        "arena",
        Transform::default().with_scale(Vec3::new(12.0, 20.0, 12.0)),
    );
    let pillar = host.spawn(root, "pillar", Transform::from_position(Vec3::new(3.0, 0.0, -3.0)));
    let rover = host.spawn(root, "rover", Transform::from_position(Vec3::new(-2.0, 0.0, 0.0)));
    let camera = host.spawn(root, "camera", Transform::from_position(Vec3::new(-2.0, 4.0, 8.0)));
    let beacon = host.spawn(root, "beacon", Transform::default());

    engine.attach::<HeightfieldCollider>(terrain, HeightfieldColliderProps { heightmap, scale: 6.0 })?;
    // Inverted: the rover is blocked when it tries to leave the arena
    engine.attach::<BoxCollider>(
        arena,
        BoxColliderProps {
            invert: true,
            ..BoxColliderProps::default()
        },
    )?;
    engine.attach::<BoxCollider>(pillar, BoxColliderProps::default())?;
    let hull = engine.attach::<SphereCollider>(rover, SphereColliderProps::new(0.3))?;
    let hull = engine.component(hull)?.handle();
    let controller = engine.attach::<RoverController>(rover, RoverProps { movement, hull })?;
    engine.attach::<FollowCamera>(camera, FollowCameraProps { target: rover })?;
    let animator = engine.attach::<Animator>(
        beacon,
        AnimatorProps {
            clips: vec![AnimationClip::new("rise", 2.0).with_translation_keys(vec![
                (0.0, Vec3::zeros()),
                (2.0, Vec3::new(0.0, 5.0, 0.0)),
            ])],
        },
    )?;
    engine.component_mut(animator)?.play(0);

    for frame in 0..FRAMES {
        for event in script(frame) {
            engine.handle_input(event);
        }
        engine.run_frame_with_delta(FRAME_DELTA);

        // Keep the rover on the ground
        let position = engine
            .host()
            .local_transform(rover)
            .map_or_else(Vec3::zeros, |t| t.position);
        let ground = engine
            .world()
            .find_component::<HeightfieldCollider>(terrain)
            .map(|hf| hf.height_at_pos(engine.host(), position.x, position.z));
        match ground {
            Some(Ok(height)) => {
                if let Some(transform) = engine.host_mut().local_transform_mut(rover) {
                    transform.position.y = height;
                }
            }
            Some(Err(e)) => log::debug!("Rover off the terrain: {e}"),
            None => {}
        }
    }

    let rover_position = engine.host().world_position(rover);
    let camera_position = engine.host().world_position(camera);
    log::info!(
        "Finished {} frames: rover at {rover_position:?}, camera at {camera_position:?}, {} blocked steps",
        engine.host().render_count(),
        engine.component(controller)?.blocked_steps
    );
    Ok(())
}
