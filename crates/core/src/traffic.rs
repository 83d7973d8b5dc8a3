//! Lane traffic engine - obstacles, the player vehicle, and collisions
//!
//! Positions are in world units on a vertical field of configurable height.
//! Obstacles enter above the top edge and move down; the vehicle sits near the
//! bottom and only changes lanes. A collision needs the same lane *and* an
//! overlapping vertical range; horizontal pixels are never compared.

use tracing::debug;

use crate::particles::{decay_flashes, Flash};
use crate::rng::SimpleRng;
use crate::types::{
    DifficultyPreset, COLLISION_SPEED_FACTOR, OBSTACLE_HIT_HEIGHT, OBSTACLE_SPAWN_Y,
    ROAD_TILE_HEIGHT, SPAWN_SPEED_JITTER, VEHICLE_BOTTOM_OFFSET, VEHICLE_HEIGHT, VEHICLE_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub lane: u8,
    pub y: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    pub lane: u8,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Vehicle {
    /// Vertical overlap with an obstacle's hit extent
    fn overlaps(&self, obstacle: &Obstacle) -> bool {
        self.y < obstacle.y + OBSTACLE_HIT_HEIGHT && self.y + self.height > obstacle.y
    }
}

/// One obstacle hit, reported back to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub lane: u8,
    pub obstacle_y: f64,
    /// Base speed after the post-collision ramp
    pub new_base_speed: f64,
}

#[derive(Debug, Clone)]
pub struct TrafficEngine {
    lane_count: u8,
    base_speed: f64,
    field_height: f64,
    vehicle: Vehicle,
    obstacles: Vec<Obstacle>,
    road_offset: f64,
    flashes: Vec<Flash>,
    rng: SimpleRng,
}

impl TrafficEngine {
    /// Empty road for a preset; the vehicle starts in the middle lane.
    pub fn new(preset: DifficultyPreset, field_height: f64, rng: SimpleRng) -> Self {
        let lane_count = preset.lane_count.max(1);
        Self {
            lane_count,
            base_speed: preset.base_obstacle_speed,
            field_height,
            vehicle: Vehicle {
                lane: lane_count / 2,
                y: field_height - VEHICLE_BOTTOM_OFFSET,
                width: VEHICLE_WIDTH,
                height: VEHICLE_HEIGHT,
            },
            obstacles: Vec::new(),
            road_offset: 0.0,
            flashes: Vec::new(),
            rng,
        }
    }

    pub fn lane_count(&self) -> u8 {
        self.lane_count
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    pub fn field_height(&self) -> f64 {
        self.field_height
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn road_offset(&self) -> f64 {
        self.road_offset
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    /// Add an obstacle in a random lane at `base * [1.0, 1.25)` speed.
    pub fn spawn_obstacle(&mut self) -> Obstacle {
        let lane = self.rng.next_range(self.lane_count as u32) as u8;
        let speed = self.base_speed * (1.0 + self.rng.next_f64() * SPAWN_SPEED_JITTER);
        let obstacle = Obstacle {
            lane,
            y: OBSTACLE_SPAWN_Y,
            speed,
        };
        self.obstacles.push(obstacle);
        obstacle
    }

    /// Place an obstacle directly (scripted scenarios and tests)
    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Move every obstacle and scroll the road by a normalized delta.
    pub fn advance(&mut self, delta: f64) {
        for o in &mut self.obstacles {
            o.y += o.speed * delta;
        }
        self.road_offset = (self.road_offset + self.base_speed * 2.0 * delta) % ROAD_TILE_HEIGHT;
    }

    /// Drop obstacles that moved past the bottom of the field.
    pub fn prune_offscreen(&mut self) -> usize {
        let before = self.obstacles.len();
        let limit = self.field_height;
        self.obstacles.retain(|o| o.y <= limit);
        before - self.obstacles.len()
    }

    /// Remove every obstacle touching the vehicle and ramp up the base speed
    /// once per hit.
    pub fn check_collisions(&mut self) -> Vec<Collision> {
        let vehicle = self.vehicle;
        let mut hits = Vec::new();
        let mut base_speed = self.base_speed;

        self.obstacles.retain(|o| {
            if o.lane != vehicle.lane || !vehicle.overlaps(o) {
                return true;
            }
            base_speed *= COLLISION_SPEED_FACTOR;
            hits.push(Collision {
                lane: o.lane,
                obstacle_y: o.y,
                new_base_speed: base_speed,
            });
            false
        });

        self.base_speed = base_speed;
        for hit in &hits {
            // Flash x is measured in lanes so any presenter can scale it.
            self.flashes.push(Flash::new(
                hit.lane as f64 + 0.5,
                vehicle.y + vehicle.height / 2.0,
            ));
            debug!(lane = hit.lane, base_speed = hit.new_base_speed, "vehicle collision");
        }
        hits
    }

    pub fn lane_left(&mut self) -> bool {
        if self.vehicle.lane == 0 {
            return false;
        }
        self.vehicle.lane -= 1;
        true
    }

    pub fn lane_right(&mut self) -> bool {
        if self.vehicle.lane + 1 >= self.lane_count {
            return false;
        }
        self.vehicle.lane += 1;
        true
    }

    pub fn decay_flashes(&mut self) {
        decay_flashes(&mut self.flashes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn road(difficulty: Difficulty) -> TrafficEngine {
        TrafficEngine::new(difficulty.preset(), 720.0, SimpleRng::new(5))
    }

    #[test]
    fn vehicle_starts_in_middle_lane() {
        assert_eq!(road(Difficulty::Easy).vehicle().lane, 1);
        assert_eq!(road(Difficulty::Normal).vehicle().lane, 2);
        assert_eq!(road(Difficulty::Hard).vehicle().lane, 2);
        assert_eq!(road(Difficulty::Easy).vehicle().y, 540.0);
    }

    #[test]
    fn lane_changes_clamp() {
        let mut t = road(Difficulty::Easy);
        assert!(t.lane_left());
        assert!(!t.lane_left());
        assert_eq!(t.vehicle().lane, 0);
        assert!(t.lane_right());
        assert!(t.lane_right());
        assert!(!t.lane_right());
        assert_eq!(t.vehicle().lane, 2);
    }

    #[test]
    fn spawned_obstacles_respect_lane_and_speed_bounds() {
        let mut t = road(Difficulty::Hard);
        for _ in 0..500 {
            let o = t.spawn_obstacle();
            assert!(o.lane < 5);
            assert!(o.speed >= 4.4 && o.speed < 4.4 * 1.25);
            assert_eq!(o.y, OBSTACLE_SPAWN_Y);
        }
    }

    #[test]
    fn advance_scales_by_delta_and_wraps_road() {
        let mut t = road(Difficulty::Easy);
        t.push_obstacle(Obstacle {
            lane: 0,
            y: 0.0,
            speed: 2.0,
        });
        t.advance(1.5);
        assert_eq!(t.obstacles()[0].y, 3.0);

        for _ in 0..200 {
            t.advance(3.0);
        }
        assert!(t.road_offset() >= 0.0 && t.road_offset() < ROAD_TILE_HEIGHT);
    }

    #[test]
    fn prune_removes_every_offscreen_obstacle_even_when_adjacent() {
        let mut t = road(Difficulty::Easy);
        for y in [730.0, 740.0, 100.0, 721.0, 720.0] {
            t.push_obstacle(Obstacle {
                lane: 0,
                y,
                speed: 1.0,
            });
        }
        assert_eq!(t.prune_offscreen(), 3);
        let ys: Vec<f64> = t.obstacles().iter().map(|o| o.y).collect();
        assert_eq!(ys, vec![100.0, 720.0]);
    }

    #[test]
    fn two_simultaneous_hits_ramp_speed_twice() {
        let mut t = road(Difficulty::Easy);
        let lane = t.vehicle().lane;
        for y in [500.0, 520.0] {
            t.push_obstacle(Obstacle {
                lane,
                y,
                speed: 1.0,
            });
        }
        let hits = t.check_collisions();
        assert_eq!(hits.len(), 2);
        assert!(t.obstacles().is_empty());
        assert!((t.base_speed() - 2.8 * 1.02 * 1.02).abs() < 1e-9);
        assert_eq!(t.flashes().len(), 2);
    }
}
