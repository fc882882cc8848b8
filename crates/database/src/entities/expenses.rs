use engine::ExpenseEntry;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub payment_mode: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ExpenseEntry> for ActiveModel {
    fn from(entry: &ExpenseEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.clone()),
            date: ActiveValue::Set(super::date_column(entry.date)),
            category: ActiveValue::Set(entry.category.to_string()),
            amount: ActiveValue::Set(entry.amount.value()),
            payment_mode: ActiveValue::Set(entry.payment_mode.to_string()),
            notes: ActiveValue::Set(entry.notes.clone()),
        }
    }
}
