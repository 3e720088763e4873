//! Gamepad slot table

/// Snapshot of one connected gamepad
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    /// Continuous axis readings, usually in `[-1, 1]`
    pub axes: Vec<f32>,
    /// Button pressed states
    pub buttons: Vec<bool>,
}

impl GamepadState {
    /// A pad with `axes` centered axes and `buttons` released buttons
    #[must_use]
    pub fn new(axes: usize, buttons: usize) -> Self {
        Self {
            axes: vec![0.0; axes],
            buttons: vec![false; buttons],
        }
    }

    /// Axis reading; 0 for an axis the pad does not have
    #[must_use]
    pub fn axis(&self, axis: usize) -> f32 {
        self.axes.get(axis).copied().unwrap_or(0.0)
    }

    /// Button state; released for a button the pad does not have
    #[must_use]
    pub fn button(&self, button: usize) -> bool {
        self.buttons.get(button).copied().unwrap_or(false)
    }

    pub(crate) fn set_axis(&mut self, axis: usize, value: f32) {
        if axis >= self.axes.len() {
            self.axes.resize(axis + 1, 0.0);
        }
        self.axes[axis] = value;
    }

    pub(crate) fn set_button(&mut self, button: usize, pressed: bool) {
        if button >= self.buttons.len() {
            self.buttons.resize(button + 1, false);
        }
        self.buttons[button] = pressed;
    }
}

/// Connected gamepads indexed by device slot
///
/// Slots are stable: disconnecting one pad never shifts another.
#[derive(Debug, Clone, Default)]
pub struct GamepadSlots {
    slots: Vec<Option<GamepadState>>,
}

impl GamepadSlots {
    /// Store a pad in `slot`, replacing whatever was there
    pub fn connect(&mut self, slot: usize, state: GamepadState) {
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(state);
    }

    /// Empty `slot`; returns the pad that was there
    pub fn disconnect(&mut self, slot: usize) -> Option<GamepadState> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Pad in `slot`, if connected
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&GamepadState> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Mutable pad in `slot`, if connected
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut GamepadState> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Number of connected pads
    #[must_use]
    pub fn connected(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}
