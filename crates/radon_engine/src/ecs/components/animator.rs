//! Single-shot clip playback
//!
//! Every clip gets one action. Playing an action restarts it from zero and
//! runs it once; there is no looping and no blending between actions. When
//! several actions are playing, the one with the highest index writes last.

use crate::ecs::{Component, ComponentContext, ComponentInit};
use crate::foundation::math::Vec3;

/// Keyframed animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Clip name, as authored
    pub name: String,
    /// Length in seconds
    pub duration: f32,
    /// `(time, local position)` keys, sorted by time
    pub translation_keys: Vec<(f32, Vec3)>,
}

impl AnimationClip {
    /// Create a clip with no tracks
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            translation_keys: Vec::new(),
        }
    }

    /// Attach a translation track; keys are sorted by time
    #[must_use]
    pub fn with_translation_keys(mut self, mut keys: Vec<(f32, Vec3)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.translation_keys = keys;
        self
    }

    /// Linearly interpolated translation at `time` (held flat outside the key range)
    #[must_use]
    pub fn sample_translation(&self, time: f32) -> Option<Vec3> {
        let first = self.translation_keys.first()?;
        if time <= first.0 {
            return Some(first.1);
        }
        for pair in self.translation_keys.windows(2) {
            let (t0, p0) = pair[0];
            let (t1, p1) = pair[1];
            if time <= t1 {
                let span = t1 - t0;
                let k = if span > 0.0 { (time - t0) / span } else { 1.0 };
                return Some(p0.lerp(&p1, k));
            }
        }
        self.translation_keys.last().map(|&(_, p)| p)
    }
}

/// Playback state of one clip
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClipAction {
    time: f32,
    playing: bool,
}

impl ClipAction {
    /// Seconds into the clip
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }

    /// Whether the action is currently advancing
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    fn rewind(&mut self) {
        self.time = 0.0;
    }
}

/// Props for [`Animator`]
#[derive(Debug, Clone, Default)]
pub struct AnimatorProps {
    /// Clips available to this animator, addressed by index
    pub clips: Vec<AnimationClip>,
}

/// Plays clips once on the owning node
#[derive(Debug)]
pub struct Animator {
    clips: Vec<AnimationClip>,
    actions: Vec<ClipAction>,
}

impl Animator {
    /// Restart clip `index` and play it once; unknown indices are ignored
    pub fn play(&mut self, index: usize) -> bool {
        let Some(action) = self.actions.get_mut(index) else {
            return false;
        };
        action.rewind();
        action.playing = true;
        true
    }

    /// Rewind clip `index` to its start without changing whether it plays
    pub fn get(&mut self, index: usize) -> Option<&ClipAction> {
        let action = self.actions.get_mut(index)?;
        action.rewind();
        Some(action)
    }

    /// Current state of clip `index`
    #[must_use]
    pub fn action(&self, index: usize) -> Option<&ClipAction> {
        self.actions.get(index)
    }

    /// Clips owned by this animator
    #[must_use]
    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }
}

impl ComponentInit for Animator {
    type Props = AnimatorProps;

    fn init(props: AnimatorProps, _ctx: &mut ComponentContext<'_>) -> Self {
        let actions = vec![ClipAction::default(); props.clips.len()];
        Self {
            clips: props.clips,
            actions,
        }
    }
}

impl Component for Animator {
    fn on_tick(&mut self, ctx: &mut ComponentContext<'_>, delta: f32) {
        for (clip, action) in self.clips.iter().zip(self.actions.iter_mut()) {
            if !action.playing {
                continue;
            }
            action.time = (action.time + delta).min(clip.duration);
            if let Some(position) = clip.sample_translation(action.time) {
                if let Some(transform) = ctx.transform_mut() {
                    transform.position = position;
                }
            }
            if action.time >= clip.duration {
                action.playing = false;
            }
        }
    }
}
