//! The module contains `AttendanceRecord`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Entity, Snapshot, Table, ValidationError, entity::id_equality, util::new_id};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl core::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        })
    }
}

/// Presence of one staff member on one day.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub staff_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

id_equality!(AttendanceRecord);

impl AttendanceRecord {
    pub fn new(staff_id: &str, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: new_id(),
            staff_id: staff_id.to_string(),
            date,
            status,
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}

impl Entity for AttendanceRecord {
    const TABLE: Table = Table::Attendance;

    fn id(&self) -> &str {
        &self.id
    }

    fn staff_id(&self) -> Option<&str> {
        Some(&self.staff_id)
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.attendance
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.attendance
    }

    /// An existing record cannot move onto a day already held by another
    /// record of the same staff member.
    fn check_unique(&self, snapshot: &Snapshot) -> Result<(), ValidationError> {
        let attendance = &snapshot.attendance;
        let exists = attendance.iter().any(|r| r.id == self.id);
        let taken = attendance
            .iter()
            .any(|r| r.id != self.id && r.staff_id == self.staff_id && r.date == self.date);
        if exists && taken {
            return Err(ValidationError::AttendanceTaken {
                staff_id: self.staff_id.clone(),
                date: self.date,
            });
        }
        Ok(())
    }

    /// At most one record exists per `(staff_id, date)`: a new record
    /// colliding with another id takes over that id and replaces it.
    fn upsert_into(mut self, snapshot: &mut Snapshot) -> Self {
        let collection = &mut snapshot.attendance;
        let slot = collection
            .iter()
            .position(|r| r.id == self.id)
            .or_else(|| {
                collection
                    .iter()
                    .position(|r| r.staff_id == self.staff_id && r.date == self.date)
            });

        match slot {
            Some(index) => {
                self.id = collection[index].id.clone();
                collection[index] = self.clone();
            }
            None => collection.push(self.clone()),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn new_record_takes_over_the_day() {
        let mut snapshot = Snapshot::default();
        let first = AttendanceRecord::new("s1", day(10), AttendanceStatus::Present);
        first.clone().upsert_into(&mut snapshot);

        let second = AttendanceRecord::new("s1", day(10), AttendanceStatus::Absent);
        assert!(second.check_unique(&snapshot).is_ok());
        let stored = second.upsert_into(&mut snapshot);

        assert_eq!(stored.id, first.id);
        assert_eq!(snapshot.attendance.len(), 1);
        assert!(!snapshot.attendance[0].is_present());
    }

    #[test]
    fn moving_onto_a_taken_day_is_rejected() {
        let mut snapshot = Snapshot::default();
        let mut moved = AttendanceRecord::new("s1", day(9), AttendanceStatus::Present);
        moved.clone().upsert_into(&mut snapshot);
        AttendanceRecord::new("s1", day(10), AttendanceStatus::Absent).upsert_into(&mut snapshot);
        AttendanceRecord::new("s2", day(11), AttendanceStatus::Absent).upsert_into(&mut snapshot);

        moved.date = day(10);
        assert_eq!(
            moved.check_unique(&snapshot),
            Err(ValidationError::AttendanceTaken {
                staff_id: "s1".to_string(),
                date: day(10),
            })
        );

        moved.date = day(11);
        assert!(moved.check_unique(&snapshot).is_ok());
        moved.upsert_into(&mut snapshot);
        assert_eq!(snapshot.attendance.len(), 3);
    }
}
