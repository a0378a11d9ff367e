//! Message entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub room_id: String,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Sender,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sender.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for devhub_core::domain::Message {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            room_id: model.room_id.into(),
            user_id: model.user_id,
            message: model.message,
            created_at: model.created_at.into(),
        }
    }
}

impl From<devhub_core::domain::Message> for ActiveModel {
    fn from(message: devhub_core::domain::Message) -> Self {
        Self {
            id: Set(message.id),
            room_id: Set(message.room_id.to_string()),
            user_id: Set(message.user_id),
            message: Set(message.message),
            created_at: Set(message.created_at.into()),
        }
    }
}
