//! The module contains `StaffMember` and `StaffRole`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Amount, Entity, Snapshot, Table, ValidationError,
    entity::id_equality,
    util::{new_id, normalize_required_name},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Receptionist,
    Cook,
    Cleaner,
    Manager,
    Security,
}

impl core::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            StaffRole::Receptionist => "Receptionist",
            StaffRole::Cook => "Cook",
            StaffRole::Cleaner => "Cleaner",
            StaffRole::Manager => "Manager",
            StaffRole::Security => "Security",
        };
        f.write_str(label)
    }
}

/// An employee.
///
/// Attendance records and salary transactions point to a staff member through
/// `staff_id`; deleting the member deletes them too.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub monthly_salary: Amount,
    pub joining_date: NaiveDate,
}

id_equality!(StaffMember);

impl StaffMember {
    pub fn new(
        name: &str,
        role: StaffRole,
        monthly_salary: Amount,
        joining_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: new_id(),
            name: normalize_required_name(name, "staff")?,
            role,
            monthly_salary,
            joining_date,
        })
    }
}

impl Entity for StaffMember {
    const TABLE: Table = Table::Staff;

    fn id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        normalize_required_name(&self.name, "staff").map(|_| ())
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.staff
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.staff
    }
}
