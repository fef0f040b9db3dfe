//! Physics simulation module
//!
//! Kinematic движение танков по SteeringCommand (FixedUpdate).
//! Rigid-body интеграция у хоста — здесь только MotionActuator seam.

pub mod movement;

// Re-export основных типов
pub use movement::{actuate, drive_enemy_tanks, MotionActuator, PhysicsSteeringPolicy, TankMovementPlugin};
