//! Cannon elevation for rigged tank sprites
//!
//! A rig is optional per tank. When present it receives an elevation value
//! every time that tank's aim changes; when absent nothing happens.

use crate::sim::{GameEvent, PlayerSlot};

/// Elevation at 90° (straight up); horizontal is 0
pub const MAX_ELEVATION: f32 = -85.0;

/// Elevation a freshly loaded rig is set to
pub const INITIAL_ELEVATION: f32 = -45.0;

/// Map an aim angle (0-180°) to rig elevation: 0 at both horizontals,
/// [`MAX_ELEVATION`] straight up.
pub fn angle_to_elevation(angle: f32) -> f32 {
    let angle = angle.clamp(0.0, 180.0);
    let from_horizontal = if angle <= 90.0 { angle } else { 180.0 - angle };
    (from_horizontal / 90.0) * MAX_ELEVATION
}

/// Something that can take an elevation value (a skeletal-animation input)
pub trait ElevationInput {
    fn set_elevation(&mut self, elevation: f32);
}

/// Optional rigs for both tanks
#[derive(Default)]
pub struct CannonRigs {
    rigs: [Option<Box<dyn ElevationInput>>; 2],
}

impl CannonRigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a rig, priming it with the initial elevation
    pub fn attach(&mut self, slot: PlayerSlot, mut rig: Box<dyn ElevationInput>) {
        rig.set_elevation(INITIAL_ELEVATION);
        self.rigs[slot.index()] = Some(rig);
    }

    pub fn detach(&mut self, slot: PlayerSlot) {
        self.rigs[slot.index()] = None;
    }

    pub fn has_rig(&self, slot: PlayerSlot) -> bool {
        self.rigs[slot.index()].is_some()
    }

    /// Forward aim changes to the matching rig
    pub fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::AimChanged { slot, angle } = *event
                && let Some(rig) = self.rigs[slot.index()].as_mut()
            {
                let elevation = angle_to_elevation(angle);
                rig.set_elevation(elevation);
                log::trace!("Player {} elevation -> {elevation:.1}", slot.number());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<f32>>>);

    impl ElevationInput for Recorder {
        fn set_elevation(&mut self, elevation: f32) {
            self.0.borrow_mut().push(elevation);
        }
    }

    #[test]
    fn test_angle_to_elevation() {
        assert_eq!(angle_to_elevation(0.0), 0.0);
        assert_eq!(angle_to_elevation(90.0), -85.0);
        assert_eq!(angle_to_elevation(180.0), 0.0);
        assert_eq!(angle_to_elevation(45.0), angle_to_elevation(135.0));
        assert!((angle_to_elevation(45.0) + 42.5).abs() < 1e-4);
    }

    #[test]
    fn test_forwards_only_to_matching_rig() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rigs = CannonRigs::new();
        rigs.attach(PlayerSlot::Two, Box::new(Recorder(seen.clone())));
        assert!(!rigs.has_rig(PlayerSlot::One));

        rigs.observe(&[
            GameEvent::AimChanged {
                slot: PlayerSlot::One,
                angle: 90.0,
            },
            GameEvent::AimChanged {
                slot: PlayerSlot::Two,
                angle: 90.0,
            },
            GameEvent::MatchReset,
        ]);

        assert_eq!(*seen.borrow(), vec![INITIAL_ELEVATION, -85.0]);
    }

    #[test]
    fn test_missing_rigs_are_noops() {
        let mut rigs = CannonRigs::new();
        rigs.observe(&[GameEvent::AimChanged {
            slot: PlayerSlot::One,
            angle: 30.0,
        }]);
        rigs.detach(PlayerSlot::One);
        assert!(!rigs.has_rig(PlayerSlot::One));
    }
}
