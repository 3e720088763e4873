//! Input management system
//!
//! Raw device events arrive as [`InputEvent`]s from the host. The manager
//! keeps two keyboard sets:
//!
//! - **level**: keys currently held, cleared per key on key-up
//! - **edge**: keys pressed since the last frame boundary, cleared by
//!   [`InputManager::end_frame`]
//!
//! Key names are case-insensitive. Every key event recomputes all virtual
//! axes immediately; [`InputManager::end_frame`] recomputes once more so
//! continuous gamepad motion, which produces no events, is picked up.
//! Missing gamepads, axes and buttons read as neutral, never as errors.

pub mod gamepad;
pub mod mapping;

pub use gamepad::{GamepadSlots, GamepadState};
pub use mapping::{AxisDef, InputMapping, InputMappingDef, MappingHandle};

use std::collections::HashSet;

use mapping::AxisSources;

/// Raw input event delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key was pressed
    KeyDown(String),
    /// A key was released
    KeyUp(String),
    /// The window lost input focus
    FocusLost,
    /// A gamepad was plugged into `slot`
    GamepadConnected {
        /// Device slot
        slot: usize,
        /// Initial readings
        state: GamepadState,
    },
    /// The gamepad in `slot` went away
    GamepadDisconnected {
        /// Device slot
        slot: usize,
    },
    /// A gamepad axis moved
    GamepadAxis {
        /// Device slot
        slot: usize,
        /// Axis index
        axis: usize,
        /// New reading
        value: f32,
    },
    /// A gamepad button changed state
    GamepadButton {
        /// Device slot
        slot: usize,
        /// Button index
        button: usize,
        /// New state
        pressed: bool,
    },
}

/// Device state read by mapping recompute
#[derive(Debug, Default)]
struct RawInput {
    keys: HashSet<String>,
    keys_now: HashSet<String>,
    gamepads: GamepadSlots,
    active_gamepad: usize,
}

impl AxisSources for RawInput {
    fn key_down(&self, key: &str) -> bool {
        self.keys.contains(&key.to_lowercase())
    }

    fn gamepad_axis(&self, axis: usize) -> f32 {
        self.gamepads
            .get(self.active_gamepad)
            .map_or(0.0, |pad| pad.axis(axis))
    }

    fn gamepad_button(&self, button: usize) -> bool {
        self.gamepads
            .get(self.active_gamepad)
            .is_some_and(|pad| pad.button(button))
    }
}

/// Input manager: raw device state plus every virtual-axis mapping
#[derive(Debug, Default)]
pub struct InputManager {
    raw: RawInput,
    mappings: Vec<InputMapping>,
}

impl InputManager {
    /// Create an input manager with no keys held and no gamepads
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one raw event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                let key = key.to_lowercase();
                self.raw.keys.insert(key.clone());
                self.raw.keys_now.insert(key);
                self.recompute();
            }
            InputEvent::KeyUp(key) => {
                let key = key.to_lowercase();
                self.raw.keys.remove(&key);
                self.raw.keys_now.remove(&key);
                self.recompute();
            }
            InputEvent::FocusLost => {
                log::debug!("Input focus lost; releasing {} held keys", self.raw.keys.len());
                self.raw.keys.clear();
                self.raw.keys_now.clear();
            }
            InputEvent::GamepadConnected { slot, state } => {
                log::info!("Gamepad connected in slot {slot}");
                self.raw.gamepads.connect(slot, state);
            }
            InputEvent::GamepadDisconnected { slot } => {
                log::info!("Gamepad disconnected from slot {slot}");
                self.raw.gamepads.disconnect(slot);
            }
            InputEvent::GamepadAxis { slot, axis, value } => {
                if let Some(pad) = self.raw.gamepads.get_mut(slot) {
                    pad.set_axis(axis, value);
                }
            }
            InputEvent::GamepadButton {
                slot,
                button,
                pressed,
            } => {
                if let Some(pad) = self.raw.gamepads.get_mut(slot) {
                    pad.set_button(button, pressed);
                }
            }
        }
    }

    /// Register a mapping; its axes start at 0 until the next recompute
    pub fn create_mapping(&mut self, def: InputMappingDef) -> MappingHandle {
        log::info!(
            "Created input mapping '{}' with {} axes",
            def.name.as_deref().unwrap_or("unnamed"),
            def.axes.len()
        );
        self.mappings.push(InputMapping::new(def));
        MappingHandle(self.mappings.len() - 1)
    }

    /// Look up a mapping
    #[must_use]
    pub fn mapping(&self, handle: MappingHandle) -> Option<&InputMapping> {
        self.mappings.get(handle.0)
    }

    /// Current value of `axis` in `handle`; 0 if either is unknown
    #[must_use]
    pub fn value(&self, handle: MappingHandle, axis: &str) -> f32 {
        self.mapping(handle).map_or(0.0, |m| m.value(axis))
    }

    /// All mappings in creation order
    #[must_use]
    pub fn mappings(&self) -> &[InputMapping] {
        &self.mappings
    }

    /// Re-evaluate every axis of every mapping
    pub fn recompute(&mut self) {
        for mapping in &mut self.mappings {
            mapping.recompute(&self.raw);
        }
    }

    /// Frame boundary: recompute, then forget which keys were newly pressed
    pub fn end_frame(&mut self) {
        self.recompute();
        self.raw.keys_now.clear();
    }

    /// Key is held
    #[must_use]
    pub fn is_key_down(&self, key: &str) -> bool {
        self.raw.key_down(key)
    }

    /// Key was pressed since the last frame boundary and is still held
    #[must_use]
    pub fn is_key_down_now(&self, key: &str) -> bool {
        self.raw.keys_now.contains(&key.to_lowercase())
    }

    /// Button state on `slot`, or on the active gamepad when `None`
    #[must_use]
    pub fn is_button_down(&self, button: usize, slot: Option<usize>) -> bool {
        self.raw
            .gamepads
            .get(slot.unwrap_or(self.raw.active_gamepad))
            .is_some_and(|pad| pad.button(button))
    }

    /// Axis reading on `slot`, or on the active gamepad when `None`
    #[must_use]
    pub fn axis(&self, axis: usize, slot: Option<usize>) -> f32 {
        self.raw
            .gamepads
            .get(slot.unwrap_or(self.raw.active_gamepad))
            .map_or(0.0, |pad| pad.axis(axis))
    }

    /// Slot read by mappings and slot-less queries
    #[must_use]
    pub const fn active_gamepad(&self) -> usize {
        self.raw.active_gamepad
    }

    /// Choose the gamepad read by mappings
    pub fn set_active_gamepad(&mut self, slot: usize) {
        self.raw.active_gamepad = slot;
    }

    /// Connected gamepads
    #[must_use]
    pub const fn gamepads(&self) -> &GamepadSlots {
        &self.raw.gamepads
    }
}
