//! Tests for steering computation.

#[cfg(test)]
mod tests {
    use super::super::steering::*;
    use super::super::targeting::select_nearest;
    use bevy::prelude::*;

    const AIMING_DISTANCE: f32 = 20.0;

    /// Агент в начале координат, смотрит на +Z, right = +X
    fn pose_facing_z() -> AgentPose {
        AgentPose::new(Vec3::ZERO, Vec3::Z, Vec3::X)
    }

    #[test]
    fn test_no_target_idles() {
        let command = compute_steering(&pose_facing_z(), None, AIMING_DISTANCE);
        assert_eq!(command, SteeringCommand::IDLE);
        assert_eq!(command.turn, 0.0);
        assert_eq!(command.throttle, 0.0);
        assert!(!command.is_aiming);
        assert!(command.is_stationary());
    }

    #[test]
    fn test_target_directly_ahead_no_turn() {
        let command = compute_steering(&pose_facing_z(), Some(Vec3::new(0.0, 0.0, 50.0)), AIMING_DISTANCE);
        assert_eq!(command.turn, 0.0);
        assert_eq!(command.throttle, 1.0);
        assert!(!command.is_aiming);
    }

    #[test]
    fn test_target_directly_behind_full_turn() {
        let command = compute_steering(&pose_facing_z(), Some(Vec3::new(0.0, 0.0, -50.0)), AIMING_DISTANCE);
        // right·direction == 0 → sign +1
        assert!((command.turn - 1.0).abs() < 1e-6, "turn = {}", command.turn);
    }

    #[test]
    fn test_turn_sign_follows_side() {
        let right = compute_steering(&pose_facing_z(), Some(Vec3::new(30.0, 0.0, 30.0)), AIMING_DISTANCE);
        let left = compute_steering(&pose_facing_z(), Some(Vec3::new(-30.0, 0.0, 30.0)), AIMING_DISTANCE);

        assert!(right.turn > 0.0);
        assert!(left.turn < 0.0);
        // 45° → 0.25
        assert!((right.turn - 0.25).abs() < 1e-5, "turn = {}", right.turn);
        assert!((left.turn + 0.25).abs() < 1e-5, "turn = {}", left.turn);
    }

    #[test]
    fn test_turn_always_in_range() {
        let pose = AgentPose::new(Vec3::new(3.0, 1.0, -2.0), Vec3::Z, Vec3::X);
        for i in 0..72 {
            let angle = (i as f32 * 5.0).to_radians();
            let target = pose.position + Vec3::new(angle.sin(), 0.0, angle.cos()) * 25.0;
            let command = compute_steering(&pose, Some(target), AIMING_DISTANCE);
            assert!(command.turn.is_finite());
            assert!((-1.0..=1.0).contains(&command.turn), "turn = {}", command.turn);
        }
    }

    #[test]
    fn test_vertical_offset_ignored() {
        let flat = compute_steering(&pose_facing_z(), Some(Vec3::new(10.0, 0.0, 10.0)), AIMING_DISTANCE);
        let raised = compute_steering(&pose_facing_z(), Some(Vec3::new(10.0, 40.0, 10.0)), AIMING_DISTANCE);

        assert_eq!(flat, raised);
        // Планарная дистанция ~14.1 < 20, несмотря на высоту 40
        assert!(raised.is_aiming);
    }

    #[test]
    fn test_far_target_approaches() {
        let command = compute_steering(&pose_facing_z(), Some(Vec3::new(0.0, 0.0, 20.5)), AIMING_DISTANCE);
        assert_eq!(command.throttle, 1.0);
        assert!(!command.is_aiming);
    }

    #[test]
    fn test_near_target_aims() {
        let command = compute_steering(&pose_facing_z(), Some(Vec3::new(0.0, 0.0, 5.0)), AIMING_DISTANCE);
        assert_eq!(command.throttle, 0.0);
        assert!(command.is_aiming);
    }

    #[test]
    fn test_exact_aiming_distance_is_aiming() {
        // Граница: distance == aiming_distance → уже целимся
        let command = compute_steering(&pose_facing_z(), Some(Vec3::new(0.0, 0.0, 20.0)), AIMING_DISTANCE);
        assert_eq!(command.throttle, 0.0);
        assert!(command.is_aiming);
    }

    #[test]
    fn test_coincident_target_no_nan() {
        let command = compute_steering(&pose_facing_z(), Some(Vec3::ZERO), AIMING_DISTANCE);
        assert_eq!(command.turn, 0.0);
        assert_eq!(command.throttle, 0.0);
        assert!(command.is_aiming);
    }

    #[test]
    fn test_target_straight_above_is_coincident() {
        // Только вертикальный offset → планарное направление нулевое
        let command = compute_steering(&pose_facing_z(), Some(Vec3::new(0.0, 15.0, 0.0)), AIMING_DISTANCE);
        assert_eq!(command.turn, 0.0);
        assert!(command.is_aiming);
    }

    #[test]
    fn test_throttle_and_aiming_are_exclusive() {
        for z in [1.0, 10.0, 19.99, 20.0, 20.01, 100.0] {
            let command = compute_steering(&pose_facing_z(), Some(Vec3::new(2.0, 0.0, z)), AIMING_DISTANCE);
            assert_eq!(command.throttle == 1.0, !command.is_aiming, "z = {}", z);
        }
    }

    #[test]
    fn test_nearest_target_scenario() {
        // Агент в начале координат, смотрит на +Z; цели (5,0,0) и (3,0,0)
        let pose = pose_facing_z();
        let targets = vec![Vec3::new(5.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)];

        let nearest = select_nearest(pose.position, targets.iter().map(|position| (*position, *position)));
        assert_eq!(nearest, Some(Vec3::new(3.0, 0.0, 0.0)));

        let command = compute_steering(&pose, nearest, AIMING_DISTANCE);
        // Цель строго справа: угол 90° → turn = +0.5
        assert!((command.turn - 0.5).abs() < 1e-6, "turn = {}", command.turn);
        assert!(command.is_aiming);
        assert_eq!(command.throttle, 0.0);
    }

    #[test]
    fn test_pose_from_transform_uses_bevy_axes() {
        let pose = AgentPose::from_transform(&Transform::from_xyz(1.0, 2.0, 3.0));
        assert_eq!(pose.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((pose.forward - Vec3::NEG_Z).length() < 1e-6);
        assert!((pose.right - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_unsigned_angle_degrees() {
        assert_eq!(unsigned_angle_degrees(Vec3::Z, Vec3::Z * 3.0), 0.0);
        assert!((unsigned_angle_degrees(Vec3::Z, Vec3::X) - 90.0).abs() < 1e-4);
        assert!((unsigned_angle_degrees(Vec3::Z, Vec3::NEG_Z) - 180.0).abs() < 1e-4);
        assert_eq!(unsigned_angle_degrees(Vec3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_stationary_uses_tolerance() {
        let noisy = SteeringCommand {
            turn: 1e-8,
            throttle: 0.0,
            is_aiming: true,
        };
        assert!(noisy.is_stationary());

        let turning = SteeringCommand {
            turn: 0.01,
            throttle: 0.0,
            is_aiming: true,
        };
        assert!(!turning.is_stationary());
    }
}
