use std::collections::VecDeque;

use axial::{Convert, Hex, Layout};
use glam::Vec2;
use log::trace;

/// How close (world units) a unit must get to a hex centre to count as standing on it.
pub const ARRIVAL_EPSILON: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Nothing left to walk.
    Idle,
    Moving,
    /// Reached an intermediate node.
    Entered(Hex),
    /// Reached the last node; time to complete the move order.
    Finished(Hex),
}

/// Walks a unit's world position along a path, one frame at a time.
#[derive(Clone, Debug)]
pub struct Traversal {
    layout: Layout,
    path: VecDeque<Hex>,
    position: Vec2,
    reached: Option<Hex>,
}

impl Traversal {
    pub fn new(path: Vec<Hex>, layout: Layout) -> Self {
        let position = path.first().map(|&hex| layout.convert(hex)).unwrap_or(Vec2::ZERO);
        Self { layout, path: path.into(), position, reached: None }
    }

    pub fn advance(&mut self, speed: f32, dt: f32) -> Step {
        let Some(&next) = self.path.front() else { return Step::Idle };
        let target: Vec2 = self.layout.convert(next);
        self.position = move_towards(self.position, target, speed * dt);
        if self.position.distance(target) >= ARRIVAL_EPSILON { return Step::Moving; }

        self.path.pop_front();
        self.reached = Some(next);
        trace!("entered {:?}, {} to go", next, self.path.len());
        if self.path.is_empty() { Step::Finished(next) } else { Step::Entered(next) }
    }

    pub fn position(&self) -> Vec2 { self.position }

    /// Last node the unit fully reached; where it would stop if the move were cancelled.
    pub fn reached(&self) -> Option<Hex> { self.reached }

    pub fn next(&self) -> Option<Hex> { self.path.front().copied() }

    pub fn remaining(&self) -> usize { self.path.len() }

    pub fn is_finished(&self) -> bool { self.path.is_empty() }
}

fn move_towards(from: Vec2, to: Vec2, max_delta: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_delta || dist == 0. { return to; }
    from + delta / dist * max_delta
}
