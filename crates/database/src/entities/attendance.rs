use engine::AttendanceRecord;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

/// One row per `(staff_id, date)`, enforced by a unique index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub staff_id: String,
    pub date: String,
    pub status: String,
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

impl From<&AttendanceRecord> for ActiveModel {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: ActiveValue::Set(record.id.clone()),
            staff_id: ActiveValue::Set(record.staff_id.clone()),
            date: ActiveValue::Set(super::date_column(record.date)),
            status: ActiveValue::Set(record.status.to_string()),
        }
    }
}
