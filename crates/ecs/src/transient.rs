//! Fire-and-forget lifetimes for cosmetic entities.

use crate::CurrentTick;
use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::system::{Commands, Query, Res};
use library_core::SimTick;

/// Despawn the entity once `expires_at` is reached.
///
/// No ordering is guaranteed between transients expiring on the same tick and
/// there is no way to cancel one.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transient {
    /// First tick at which the entity no longer exists.
    pub expires_at: SimTick,
}

impl Transient {
    /// Transient that lives `millis` milliseconds from `now`.
    pub fn after_millis(now: SimTick, millis: u64) -> Self {
        Self {
            expires_at: now.after_millis(millis),
        }
    }
}

/// Despawn every transient whose deadline has passed.
pub fn expire_transients(
    mut commands: Commands,
    tick: Res<CurrentTick>,
    transients: Query<(Entity, &Transient)>,
) {
    for (entity, transient) in &transients {
        if transient.expires_at <= tick.0 {
            tracing::trace!(?entity, tick = tick.0 .0, "transient expired");
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_default_schedule, run_tick};
    use bevy_ecs::world::World;

    #[test]
    fn transients_despawn_at_deadline() {
        let mut world = World::default();
        let mut schedules = build_default_schedule();
        let short = world.spawn(Transient::after_millis(SimTick::ZERO, 100)).id();
        let long = world.spawn(Transient::after_millis(SimTick::ZERO, 3000)).id();
        let permanent = world.spawn_empty().id();

        run_tick(&mut world, &mut schedules, SimTick(1));
        assert!(world.get_entity(short).is_some());

        run_tick(&mut world, &mut schedules, SimTick(2));
        assert!(world.get_entity(short).is_none());
        assert!(world.get_entity(long).is_some());

        run_tick(&mut world, &mut schedules, SimTick(60));
        assert!(world.get_entity(long).is_none());
        assert!(world.get_entity(permanent).is_some());
    }
}
