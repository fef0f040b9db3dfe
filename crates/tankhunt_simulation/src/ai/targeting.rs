//! Target selection: ближайший кандидат по squared distance.

use bevy::prelude::*;

use crate::components::{EnemyTank, TankTag, TankTuning};

/// Weak reference на текущую цель танка
///
/// Перезаписывается каждый decision tick. Entity может быть уже despawned —
/// читатели обязаны резолвить его через Query::get (liveness check).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CurrentTarget(pub Option<Entity>);

impl CurrentTarget {
    pub fn entity(&self) -> Option<Entity> {
        self.0
    }
}

/// Ближайший кандидат к `origin` (или None для пустого набора)
///
/// Сравнение по squared distance, без sqrt на каждого кандидата.
/// При равных дистанциях выигрывает первый (строгое `<`).
/// Кандидат с NaN дистанцией никогда не выбирается.
pub fn select_nearest<H>(origin: Vec3, candidates: impl IntoIterator<Item = (H, Vec3)>) -> Option<H> {
    let mut closest: Option<H> = None;
    let mut closest_distance_sq = f32::INFINITY;

    for (handle, position) in candidates {
        let distance_sq = position.distance_squared(origin);
        if distance_sq < closest_distance_sq {
            closest_distance_sq = distance_sq;
            closest = Some(handle);
        }
    }

    closest
}

/// Система: выбор ближайшей цели для каждого AI танка
///
/// Кандидаты — все entity с `TankTag == tuning.target_tag`, кроме самого танка.
/// Никакого кэша между тиками: поиск с нуля каждый раз (цель могла умереть).
pub fn select_nearest_targets(
    mut hunters: Query<(Entity, &Transform, &TankTuning, &mut CurrentTarget), With<EnemyTank>>,
    candidates: Query<(Entity, &Transform, &TankTag)>,
) {
    for (entity, transform, tuning, mut current) in hunters.iter_mut() {
        let nearest = select_nearest(
            transform.translation,
            candidates
                .iter()
                .filter(|(candidate, _, tag)| *candidate != entity && **tag == tuning.target_tag)
                .map(|(candidate, candidate_transform, _)| (candidate, candidate_transform.translation)),
        );

        // Пишем только при смене — иначе Changed<CurrentTarget> спамит
        if current.0 != nearest {
            match nearest {
                Some(target) => crate::log(&format!("🎯 Tank {:?}: new target {:?}", entity, target)),
                None => crate::log(&format!("🎯 Tank {:?}: no targets left", entity)),
            }
            current.0 = nearest;
        }
    }
}
