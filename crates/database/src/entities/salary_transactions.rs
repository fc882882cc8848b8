use engine::SalaryTransaction;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "salary_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub staff_id: String,
    pub date: String,
    pub amount: f64,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Staff,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SalaryTransaction> for ActiveModel {
    fn from(transaction: &SalaryTransaction) -> Self {
        Self {
            id: ActiveValue::Set(transaction.id.clone()),
            staff_id: ActiveValue::Set(transaction.staff_id.clone()),
            date: ActiveValue::Set(super::date_column(transaction.date)),
            amount: ActiveValue::Set(transaction.amount.value()),
            kind: ActiveValue::Set(transaction.kind.to_string()),
            notes: ActiveValue::Set(transaction.notes.clone()),
        }
    }
}
