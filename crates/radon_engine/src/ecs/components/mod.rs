//! Built-in components

pub mod animator;
pub mod follow_camera;

pub use animator::{AnimationClip, Animator, AnimatorProps, ClipAction};
pub use follow_camera::{FollowCamera, FollowCameraProps};
