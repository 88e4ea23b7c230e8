//! Exception overlay: partitions scheduled dates into excused and not excused.

use crate::models::exception::ExceptionRecord;
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Lookup set consumed by the reconciler.
    pub excused: BTreeSet<NaiveDate>,
    /// Same dates, ascending, for display.
    pub exception_dates: Vec<NaiveDate>,
}

/// A scheduled date is excused when any exception of the worker covers it.
/// Exceptions that were closed later still excuse the historical dates they
/// covered; malformed records (end before start) cover nothing.
pub fn overlay(scheduled: &BTreeSet<NaiveDate>, exceptions: &[ExceptionRecord]) -> Overlay {
    let excused: BTreeSet<NaiveDate> = scheduled
        .iter()
        .copied()
        .filter(|d| exceptions.iter().any(|ex| ex.excuses(*d)))
        .collect();

    Overlay {
        exception_dates: excused.iter().copied().collect(),
        excused,
    }
}
