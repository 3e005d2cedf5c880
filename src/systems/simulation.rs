//! Simulation system
//!
//! Manages the per-frame update:
//! - Pending arcball gestures → camera orientation
//! - Delta time → fixed-rate orbit ticks

use std::time::Instant;
use fileorbit_core::Scene;
use fileorbit_input::ArcballController;
use crate::config::SimulationConfig;

/// Tick rate used when the configured one is not positive
const FALLBACK_TICK_RATE: f32 = 60.0;

/// Manages the simulation loop
///
/// Orbit speed is defined per tick, so ticks run at a fixed rate no matter
/// how fast frames are presented.
pub struct SimulationSystem {
    last_frame: Instant,
    accumulator: f32,
    tick_interval: f32,
    max_ticks_per_frame: u32,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(config: &SimulationConfig) -> Self {
        let tick_rate = if config.tick_rate > 0.0 {
            config.tick_rate
        } else {
            log::warn!(
                "Invalid tick rate {}, using {}",
                config.tick_rate,
                FALLBACK_TICK_RATE
            );
            FALLBACK_TICK_RATE
        };

        Self {
            last_frame: Instant::now(),
            accumulator: 0.0,
            tick_interval: 1.0 / tick_rate,
            max_ticks_per_frame: config.max_ticks_per_frame.max(1),
        }
    }

    /// Run one frame: apply pointer input, then orbit ticks
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, scene: &mut Scene, controller: &mut ArcballController) -> u32 {
        controller.update(scene.camera_mut());

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.advance(dt, scene)
    }

    /// Feed `dt` seconds into the accumulator and run the ticks it covers
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) -> u32 {
        self.accumulator += dt.max(0.0);

        let mut ticks = 0;
        while self.accumulator >= self.tick_interval && ticks < self.max_ticks_per_frame {
            scene.tick();
            self.accumulator -= self.tick_interval;
            ticks += 1;
        }

        // Drop the backlog after a stall instead of catching up
        if ticks == self.max_ticks_per_frame && self.accumulator >= self.tick_interval {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= self.tick_interval;
        }

        ticks
    }

    /// Forget elapsed time, e.g. after the window was hidden
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
        self.accumulator = 0.0;
    }

    /// Seconds per tick
    pub fn tick_interval(&self) -> f32 {
        self.tick_interval
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileorbit_core::DirectoryEntry;

    fn config(tick_rate: f32, max_ticks_per_frame: u32) -> SimulationConfig {
        SimulationConfig { tick_rate, max_ticks_per_frame }
    }

    fn orbiting_scene() -> Scene {
        let mut scene = Scene::default().with_seed(1).with_orbit(true);
        scene.rebuild(vec![DirectoryEntry::file("a"), DirectoryEntry::directory("b")]);
        scene
    }

    #[test]
    fn test_fixed_rate_ticks() {
        let mut sim = SimulationSystem::new(&config(10.0, 100));
        let mut scene = orbiting_scene();

        assert_eq!(sim.advance(0.05, &mut scene), 0);
        assert_eq!(sim.advance(0.06, &mut scene), 1);
        assert_eq!(sim.advance(0.35, &mut scene), 3);
    }

    #[test]
    fn test_ticks_capped_per_frame() {
        let mut sim = SimulationSystem::new(&config(100.0, 4));
        let mut scene = orbiting_scene();

        assert_eq!(sim.advance(5.0, &mut scene), 4);
        // Backlog was dropped, the next short frame does not catch up
        assert!(sim.advance(0.001, &mut scene) <= 1);
    }

    #[test]
    fn test_ticks_reach_scene() {
        let mut sim = SimulationSystem::new(&config(60.0, 8));
        let mut scene = orbiting_scene();
        sim.advance(0.1, &mut scene);
        assert!(scene.entities().iter().all(|e| e.orbit().is_started()));
    }

    #[test]
    fn test_invalid_tick_rate_falls_back() {
        let sim = SimulationSystem::new(&config(0.0, 8));
        assert!((sim.tick_interval() - 1.0 / FALLBACK_TICK_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clock_discards_partial_tick() {
        let mut sim = SimulationSystem::new(&config(10.0, 8));
        let mut scene = orbiting_scene();

        assert_eq!(sim.advance(0.05, &mut scene), 0);
        sim.reset_clock();
        assert_eq!(sim.advance(0.06, &mut scene), 0);
        assert_eq!(sim.advance(0.05, &mut scene), 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut sim = SimulationSystem::default();
        let mut scene = orbiting_scene();
        assert_eq!(sim.advance(-1.0, &mut scene), 0);
    }

    #[test]
    fn test_update_applies_pointer_input() {
        use winit::event::{ElementState, MouseButton};

        let mut sim = SimulationSystem::default();
        let mut scene = orbiting_scene();
        let mut controller = ArcballController::new(200, 200);
        controller.process_cursor_moved(100.0, 100.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(150.0, 100.0);

        sim.update(&mut scene, &mut controller);
        assert!(!controller.has_pending());
        assert_ne!(scene.camera().drag(), scene.camera().click());
    }
}
