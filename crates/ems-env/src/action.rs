//! Dispatch actions.
//!
//! One action covers every severity tier in a single step: index 0 is the
//! repositioning slot, indices `1..=severity_levels` pick a start and end
//! hospital for the oldest queued emergency of that tier.  A null id
//! ([`HospitalId::NULL`]) in the start slot skips the tier.

use ems_core::HospitalId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    /// Hospital dispatching for each tier (index 0 = reposition origin).
    pub start_hospitals: Vec<HospitalId>,
    /// Hospital the ambulance returns to (null means "same as start").
    pub end_hospitals: Vec<HospitalId>,
}

impl Action {
    pub fn new(start_hospitals: Vec<HospitalId>, end_hospitals: Vec<HospitalId>) -> Self {
        Self { start_hospitals, end_hospitals }
    }

    /// The do-nothing action: every slot null.
    pub fn null(severity_levels: u8) -> Self {
        let slots = severity_levels as usize + 1;
        Self {
            start_hospitals: vec![HospitalId::NULL; slots],
            end_hospitals: vec![HospitalId::NULL; slots],
        }
    }

    /// Number of tier slots including the repositioning slot.
    pub fn len(&self) -> usize {
        self.start_hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_hospitals.is_empty()
    }
}
