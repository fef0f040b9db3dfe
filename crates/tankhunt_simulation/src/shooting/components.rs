//! Aiming handoff — граница между движением и стрельбой
//!
//! Flow:
//! 1. Steering (decision tick) → AimingStatus event на каждый танк
//! 2. receive_aiming_status → AimHandoff компонент (для хоста, который поллит)
//! 3. Стрельба (хост / отдельный plugin) решает, стрелять ли
//!
//! Steering НЕ пишет флаг напрямую: единственный writer AimHandoff — эта система.

use bevy::prelude::*;

/// Event: результат decision tick для стрельбы
///
/// Пишется ровно один раз на танк за tick.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AimingStatus {
    /// Чей статус
    pub tank: Entity,
    /// На кого целимся (None — цели нет)
    pub target: Option<Entity>,
    /// Цель в радиусе aiming_distance, танк стоит
    pub is_aiming: bool,
}

/// Последний полученный aiming статус танка
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AimHandoff {
    pub is_aiming: bool,
    pub target: Option<Entity>,
}

impl AimHandoff {
    /// Можно ли стрелять (есть цель и танк в режиме aiming)
    pub fn ready_to_fire(&self) -> bool {
        self.is_aiming && self.target.is_some()
    }
}

/// Система: AimingStatus → AimHandoff
pub fn receive_aiming_status(mut events: EventReader<AimingStatus>, mut handoffs: Query<&mut AimHandoff>) {
    for status in events.read() {
        let Ok(mut handoff) = handoffs.get_mut(status.tank) else {
            continue;
        };

        let next = AimHandoff {
            is_aiming: status.is_aiming,
            target: status.target,
        };

        // Changed<AimHandoff> только при реальной смене
        if *handoff != next {
            *handoff = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_handoff_default() {
        let handoff = AimHandoff::default();
        assert!(!handoff.is_aiming);
        assert!(!handoff.ready_to_fire());
    }

    #[test]
    fn test_ready_to_fire_requires_target() {
        let no_target = AimHandoff {
            is_aiming: true,
            target: None,
        };
        assert!(!no_target.ready_to_fire());

        let with_target = AimHandoff {
            is_aiming: true,
            target: Some(Entity::from_raw(7)),
        };
        assert!(with_target.ready_to_fire());
    }

    #[test]
    fn test_receive_aiming_status_updates_handoff() {
        let mut app = App::new();
        app.add_event::<AimingStatus>()
            .add_systems(Update, receive_aiming_status);

        let tank = app.world_mut().spawn(AimHandoff::default()).id();
        let target = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(AimingStatus {
            tank,
            target: Some(target),
            is_aiming: true,
        });
        app.update();

        let handoff = app.world().get::<AimHandoff>(tank).copied().expect("tank has AimHandoff");
        assert!(handoff.ready_to_fire());
        assert_eq!(handoff.target, Some(target));
    }
}
