#![warn(missing_docs)]
//! ECS schedule helpers wrapping `bevy_ecs` for deterministic staging, plus the
//! scene-agnostic components every library object is built from.

mod components;
mod transient;

pub use components::{Interactable, MaterialRef, MeshShape, SceneLabel, Transform};
pub use transient::{expire_transients, Transient};

use bevy_ecs::schedule::{IntoSystemConfigs, Schedule, ScheduleLabel, Schedules};
use bevy_ecs::system::Resource;
use bevy_ecs::world::World;
use library_core::SimTick;

/// Label for the per-frame library schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ScheduleLabel)]
pub struct FrameSchedule;

/// Tick currently being simulated, visible to systems.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentTick(pub SimTick);

impl Default for CurrentTick {
    fn default() -> Self {
        Self(SimTick::ZERO)
    }
}

/// Build the baseline frame schedule. Transient expiry always runs last.
pub fn build_default_schedule() -> Schedules {
    let mut schedules = Schedules::default();
    let mut schedule = Schedule::new(FrameSchedule);
    schedule.set_apply_final_deferred(true);
    schedule.add_systems(expire_transients.in_set(CleanupSet));
    schedules.insert(schedule);
    schedules
}

/// System set holding end-of-frame cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bevy_ecs::schedule::SystemSet)]
pub struct CleanupSet;

/// Run the frame schedule for a given tick.
pub fn run_tick(world: &mut World, schedules: &mut Schedules, tick: SimTick) {
    tracing::trace!(tick = tick.0, "running frame schedule");
    world.insert_resource(CurrentTick(tick));
    if let Some(schedule) = schedules.get_mut(FrameSchedule) {
        schedule.run(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::system::{Res, ResMut};

    #[derive(Resource, Default)]
    struct Counter(u32);

    #[derive(Resource, Default)]
    struct SeenTick(u64);

    #[test]
    fn default_schedule_runs_added_systems() {
        let mut world = World::default();
        world.insert_resource(Counter::default());
        world.insert_resource(SeenTick::default());
        let mut schedules = build_default_schedule();

        if let Some(schedule) = schedules.get_mut(FrameSchedule) {
            schedule.add_systems(
                |mut counter: ResMut<Counter>, tick: Res<CurrentTick>, mut seen: ResMut<SeenTick>| {
                    counter.0 += 1;
                    seen.0 = tick.0 .0;
                },
            );
        }

        run_tick(&mut world, &mut schedules, SimTick(7));
        assert_eq!(world.resource::<Counter>().0, 1);
        assert_eq!(world.resource::<SeenTick>().0, 7);
    }
}
