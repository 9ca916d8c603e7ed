//! Mutable simulation records: hospitals, queued emergencies, and in-flight
//! ambulances.
//!
//! An in-flight ambulance carries an explicit [`Phase`] tag rather than
//! living in one of two loosely synchronized lists: the outgoing→incoming
//! transition is a field update, so a resolved ambulance can never be
//! appended to the wrong collection.

use chrono::NaiveDateTime;

use ems_core::{DistrictCode, HospitalId, Point};

// ── Hospital ──────────────────────────────────────────────────────────────────

/// A hospital with its ambulance roster.
///
/// Invariant: `available <= fleet_size`, and every decrement (dispatch) is
/// matched by exactly one later increment (arrival at the destination
/// hospital — not necessarily this one).
#[derive(Clone, Debug)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub location: Point,
    /// District the hospital geocodes into ([`DistrictCode::UNASSIGNED`] if
    /// its coordinates fall outside every configured polygon).
    pub district: DistrictCode,
    /// Configured roster size, restored on `reset`.
    pub fleet_size: u32,
    /// Ambulances currently parked here.
    pub available: u32,
}

// ── Emergency ─────────────────────────────────────────────────────────────────

/// An unattended emergency, owned by its severity tier's FIFO queue from
/// generation until dispatch.
#[derive(Clone, Debug)]
pub struct Emergency {
    pub location: Point,
    pub district: DistrictCode,
    /// Severity tier in `1..=severity_levels` (tier 0 never holds real
    /// emergencies).
    pub severity: u8,
    pub created_at: NaiveDateTime,
}

// ── ActiveAmbulance ───────────────────────────────────────────────────────────

/// Leg of an in-flight ambulance's trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// En route to the emergency (or repositioning pickup point).
    Outgoing,
    /// Objective reached; en route back to the destination hospital.
    Incoming,
}

/// A dispatched ambulance between leaving its start hospital and being
/// credited back at its destination hospital.
#[derive(Clone, Debug)]
pub struct ActiveAmbulance {
    pub phase: Phase,
    /// When the ambulance reaches its emergency/objective.  Crossing this
    /// instant flips the phase and releases `reward` into the step total.
    pub pickup_at: NaiveDateTime,
    /// When the ambulance reaches `destination` and its hospital's
    /// availability is credited.
    pub hospital_at: NaiveDateTime,
    pub destination: HospitalId,
    /// Reward released at pickup: `-pickup_travel_secs * severity` (0 for
    /// repositioning moves).
    pub reward: f64,
}
