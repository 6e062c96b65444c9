//! The puzzle as the rest of the application sees it.
use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::utils::config::PuzzleConfig;
use crate::utils::controls::{Controls, GestureState};
use crate::utils::cube::Cube;
use crate::utils::projection::ViewCamera;

/// Owns the cube, its controls and the shuffle randomness.
///
/// Every operation returns whether it had an effect; requests that conflict
/// with a running operation are ignored.
#[derive(Resource, Debug, Clone)]
pub struct Puzzle {
    cube: Cube,
    controls: Controls,
    config: PuzzleConfig,
    random_gen: ChaCha8Rng,
    /// Bumped every time the cube is rebuilt, so the scene knows to respawn.
    generation: u64,
}

impl Puzzle {
    pub fn new(config: PuzzleConfig) -> Self {
        let order = config.order;
        Self {
            cube: build_cube(&config, order),
            controls: Controls::new(&config, order),
            random_gen: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            generation: 0,
        }
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn order(&self) -> u32 {
        self.cube.order()
    }

    pub fn state(&self) -> GestureState {
        self.controls.state()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuilds a solved puzzle of `order`, dropping history and any running
    /// operation. Orders outside the configured range are rejected.
    pub fn set_order(&mut self, order: u32) -> bool {
        if let Err(err) = self.config.check_order(order) {
            log::debug!("set_order ignored: {err}");
            return false;
        }
        self.cube = build_cube(&self.config, order);
        self.controls = Controls::new(&self.config, order);
        self.generation += 1;
        log::debug!("rebuilt puzzle at order {order}");
        true
    }

    /// Resets the current puzzle to solved.
    pub fn restore(&mut self) -> bool {
        self.set_order(self.order())
    }

    pub fn shuffle(&mut self, steps: u32) -> bool {
        self.controls.shuffle(steps)
    }

    pub fn undo(&mut self) -> bool {
        self.controls.undo(&mut self.cube)
    }

    pub fn solve(&mut self) -> bool {
        self.controls.solve(&mut self.cube)
    }

    pub fn cancel(&mut self) -> bool {
        self.controls.cancel()
    }

    pub fn start(&mut self, pos: Vec2, view: &ViewCamera) -> bool {
        self.controls.input_enabled() && self.controls.operate_start(&self.cube, pos, view)
    }

    pub fn drag(&mut self, pos: Vec2, now: Duration, view: &ViewCamera) -> bool {
        self.controls.input_enabled() && self.controls.operate_drag(&mut self.cube, pos, now, view)
    }

    pub fn end(&mut self) -> bool {
        self.controls.input_enabled() && self.controls.operate_end(&mut self.cube)
    }

    /// Advances the running animation by one frame.
    pub fn tick(&mut self, view: &ViewCamera) -> bool {
        let Self {
            cube,
            controls,
            random_gen,
            ..
        } = self;
        controls.tick(cube, random_gen, view)
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new(PuzzleConfig::default())
    }
}

fn build_cube(config: &PuzzleConfig, order: u32) -> Cube {
    Cube::new(order, config.size).with_slice_drag_gain(config.slice_drag_gain)
}
