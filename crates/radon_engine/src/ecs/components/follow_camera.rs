//! Camera rig that trails a target node

use crate::ecs::{Component, ComponentContext, ComponentInit};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Vec3;

/// Props for [`FollowCamera`]
#[derive(Debug, Clone, Copy)]
pub struct FollowCameraProps {
    /// Node to follow
    pub target: NodeId,
}

/// Moves its node by however far the target moved since the last tick,
/// preserving the initial offset between the two.
#[derive(Debug)]
pub struct FollowCamera {
    target: NodeId,
    last_target_position: Vec3,
}

impl FollowCamera {
    /// Node being followed
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }
}

impl ComponentInit for FollowCamera {
    type Props = FollowCameraProps;

    fn init(props: FollowCameraProps, ctx: &mut ComponentContext<'_>) -> Self {
        let last_target_position = ctx
            .scene
            .local_transform(props.target)
            .map_or_else(Vec3::zeros, |t| t.position);
        Self {
            target: props.target,
            last_target_position,
        }
    }
}

impl Component for FollowCamera {
    fn on_tick(&mut self, ctx: &mut ComponentContext<'_>, _delta: f32) {
        let Some(target_position) = ctx.scene.local_transform(self.target).map(|t| t.position) else {
            return;
        };
        let moved = target_position - self.last_target_position;
        if let Some(transform) = ctx.transform_mut() {
            transform.position += moved;
        }
        self.last_target_position = target_position;
    }
}
