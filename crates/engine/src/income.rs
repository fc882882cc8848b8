//! The module contains `IncomeEntry` and its source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Amount, Entity, Snapshot, Table,
    entity::id_equality,
    util::{new_id, normalize_optional_text},
};

/// Where the money came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeSource {
    #[serde(rename = "Room Rent", alias = "RoomRent")]
    RoomRent,
    Restaurant,
    #[serde(rename = "Extra Services", alias = "ExtraServices")]
    ExtraServices,
    Other,
}

impl IncomeSource {
    pub const ALL: [IncomeSource; 4] = [
        IncomeSource::RoomRent,
        IncomeSource::Restaurant,
        IncomeSource::ExtraServices,
        IncomeSource::Other,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            IncomeSource::RoomRent => "Room Rent",
            IncomeSource::Restaurant => "Restaurant",
            IncomeSource::ExtraServices => "Extra Services",
            IncomeSource::Other => "Other",
        }
    }
}

impl core::fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Money earned on a given day.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: String,
    pub date: NaiveDate,
    pub source: IncomeSource,
    pub amount: Amount,
    #[serde(default)]
    pub notes: Option<String>,
}

id_equality!(IncomeEntry);

impl IncomeEntry {
    pub fn new(date: NaiveDate, source: IncomeSource, amount: Amount, notes: Option<&str>) -> Self {
        Self {
            id: new_id(),
            date,
            source,
            amount,
            notes: normalize_optional_text(notes),
        }
    }
}

impl Entity for IncomeEntry {
    const TABLE: Table = Table::Income;

    fn id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) {
        self.notes = normalize_optional_text(self.notes.as_deref());
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.income
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.income
    }
}
