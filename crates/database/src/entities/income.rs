use engine::IncomeEntry;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "income")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: String,
    pub source: String,
    pub amount: f64,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&IncomeEntry> for ActiveModel {
    fn from(entry: &IncomeEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.clone()),
            date: ActiveValue::Set(super::date_column(entry.date)),
            source: ActiveValue::Set(entry.source.to_string()),
            amount: ActiveValue::Set(entry.amount.value()),
            notes: ActiveValue::Set(entry.notes.clone()),
        }
    }
}
