//! Platform abstraction layer
//!
//! The core never listens for events itself. Whatever owns the window writes
//! key/pointer state into an `InputProvider`; once per tick the simulation
//! takes a snapshot of it (`capture`) and works only from that snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::state::Bounds;
use crate::sim::tick::{DirectionKeys, TickInput};

/// Movement keys relative to the ship's facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

/// Source of raw input and viewport size
pub trait InputProvider {
    fn key_held(&self, direction: Direction) -> bool;
    fn pointer_position(&self) -> Vec2;
    /// Edge-triggered: returns true at most once per click
    fn take_click(&mut self) -> bool;
    /// Primary button currently held down
    fn fire_held(&self) -> bool {
        false
    }
    fn play_bounds(&self) -> Bounds;
}

/// Snapshot the provider for one tick
pub fn capture<P: InputProvider + ?Sized>(provider: &mut P) -> TickInput {
    TickInput {
        keys: DirectionKeys {
            forward: provider.key_held(Direction::Forward),
            back: provider.key_held(Direction::Back),
            left: provider.key_held(Direction::Left),
            right: provider.key_held(Direction::Right),
        },
        pointer: provider.pointer_position(),
        clicked: provider.take_click(),
        fire_held: provider.fire_held(),
        bounds: provider.play_bounds(),
    }
}

/// Plain input state an event layer can write into
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: DirectionKeys,
    pub pointer: Vec2,
    pub fire_held: bool,
    pub bounds: Bounds,
    pending_click: bool,
}

impl InputState {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            pointer: bounds.center(),
            bounds,
            ..Default::default()
        }
    }

    pub fn set_key(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Forward => self.keys.forward = held,
            Direction::Back => self.keys.back = held,
            Direction::Left => self.keys.left = held,
            Direction::Right => self.keys.right = held,
        }
    }

    /// Queue a click for the next tick
    pub fn click(&mut self) {
        self.pending_click = true;
    }
}

impl InputProvider for InputState {
    fn key_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.keys.forward,
            Direction::Back => self.keys.back,
            Direction::Left => self.keys.left,
            Direction::Right => self.keys.right,
        }
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.pending_click)
    }

    fn fire_held(&self) -> bool {
        self.fire_held
    }

    fn play_bounds(&self) -> Bounds {
        self.bounds
    }
}
