//! Keyboard state polled by the player controller each physics tick.
//!
//! Most terminals only report key presses (plus auto-repeat), never
//! releases. A key pressed that way stays down for
//! `INPUT_FIRST_PRESS_HOLD_TICKS` physics ticks after the initial press,
//! long enough to reach the first auto-repeat, and for `INPUT_HOLD_TICKS`
//! after each repeat. A quick tap therefore reads as a short hold. Terminals that do report releases (kitty
//! keyboard protocol) mark keys as latched instead; those stay down until
//! `release` is called.

use super::constants::{INPUT_FIRST_PRESS_HOLD_TICKS, INPUT_HOLD_TICKS};

/// Keys that drive the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Left,
    Right,
}

impl Key {
    pub const ALL: [Key; 3] = [Key::Up, Key::Left, Key::Right];

    fn slot(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Left => 1,
            Key::Right => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct KeySlot {
    down: bool,
    /// `None` while latched (held until an explicit release).
    hold_ticks: Option<u32>,
    release_subscribed: bool,
    release_fired: bool,
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    slots: [KeySlot; 3],
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.slots[key.slot()].down
    }

    /// Press (or auto-repeat) from a terminal without release events.
    pub fn press(&mut self, key: Key) {
        let slot = &mut self.slots[key.slot()];
        if !slot.down {
            slot.hold_ticks = Some(INPUT_FIRST_PRESS_HOLD_TICKS);
        } else if !slot.down_latched() {
            slot.hold_ticks = Some(INPUT_HOLD_TICKS);
        }
        slot.down = true;
    }

    /// Press from a terminal that will report the matching release.
    pub fn press_latched(&mut self, key: Key) {
        let slot = &mut self.slots[key.slot()];
        slot.down = true;
        slot.hold_ticks = None;
    }

    pub fn release(&mut self, key: Key) {
        let slot = &mut self.slots[key.slot()];
        if !slot.down {
            return;
        }
        slot.down = false;
        slot.hold_ticks = Some(0);
        if slot.release_subscribed {
            slot.release_subscribed = false;
            slot.release_fired = true;
        }
    }

    /// Subscribe once to the next release of `key`. If the key is already
    /// up, the subscription fires immediately.
    pub fn on_release(&mut self, key: Key) {
        let slot = &mut self.slots[key.slot()];
        if slot.down {
            slot.release_subscribed = true;
            slot.release_fired = false;
        } else {
            slot.release_subscribed = false;
            slot.release_fired = true;
        }
    }

    /// Consume a fired release subscription for `key`.
    pub fn take_release(&mut self, key: Key) -> bool {
        std::mem::take(&mut self.slots[key.slot()].release_fired)
    }

    /// Decay hold timers by one physics tick, releasing expired keys.
    pub fn tick(&mut self) {
        for key in Key::ALL {
            let expired = match &mut self.slots[key.slot()].hold_ticks {
                Some(ticks) if *ticks > 0 => {
                    *ticks -= 1;
                    *ticks == 0
                }
                _ => false,
            };
            if expired {
                self.release(key);
            }
        }
    }

    /// Release everything and drop subscriptions (run reset).
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

impl KeySlot {
    fn down_latched(&self) -> bool {
        self.down && self.hold_ticks.is_none()
    }
}
