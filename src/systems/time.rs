//! Time update system.
//!
//! Advances [`WorldTime`](crate::resources::worldtime::WorldTime) once per
//! frame, applying `time_scale` to the provided delta.

use crate::resources::gameconfig::DtMode;
use crate::resources::worldtime::WorldTime;

/// Pick the unscaled frame delta: the measured one, or the configured step.
pub fn select_dt(mode: DtMode, fixed_timestep: f32, real_dt: f32) -> f32 {
    match mode {
        DtMode::Fixed => fixed_timestep,
        DtMode::Actual => real_dt.max(0.0),
    }
}

/// Update elapsed and delta seconds on `WorldTime` and return the scaled dt.
///
/// `dt` is expected to be the unscaled frame delta in seconds.
pub fn update_world_time(wt: &mut WorldTime, dt: f32) -> f32 {
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    scaled_dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scaled_delta_accumulates() {
        let mut wt = WorldTime {
            time_scale: 0.5,
            ..WorldTime::default()
        };
        assert_relative_eq!(update_world_time(&mut wt, 0.1), 0.05);
        update_world_time(&mut wt, 0.1);
        assert_relative_eq!(wt.elapsed, 0.1);
        assert_relative_eq!(wt.delta, 0.05);
    }

    #[test]
    fn fixed_mode_ignores_measured_dt() {
        assert_eq!(select_dt(DtMode::Fixed, 1.0 / 60.0, 0.5), 1.0 / 60.0);
        assert_eq!(select_dt(DtMode::Actual, 1.0 / 60.0, 0.5), 0.5);
        assert_eq!(select_dt(DtMode::Actual, 1.0 / 60.0, -1.0), 0.0);
    }
}
