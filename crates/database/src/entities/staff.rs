use engine::StaffMember;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub role: String,
    pub monthly_salary: f64,
    pub joining_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
    #[sea_orm(has_many = "super::salary_transactions::Entity")]
    SalaryTransactions,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl Related<super::salary_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalaryTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&StaffMember> for ActiveModel {
    fn from(member: &StaffMember) -> Self {
        Self {
            id: ActiveValue::Set(member.id.clone()),
            name: ActiveValue::Set(member.name.clone()),
            role: ActiveValue::Set(member.role.to_string()),
            monthly_salary: ActiveValue::Set(member.monthly_salary.value()),
            joining_date: ActiveValue::Set(super::date_column(member.joining_date)),
        }
    }
}
