//! Notification entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub to_user: Uuid,
    pub from_user: Uuid,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub read: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ToUser",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Recipient,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FromUser",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Sender,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for devhub_core::domain::Notification {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            to_user: model.to_user,
            from_user: model.from_user,
            kind: model.kind.into(),
            read: model.read,
            created_at: model.created_at.into(),
        }
    }
}

impl From<devhub_core::domain::Notification> for ActiveModel {
    fn from(notification: devhub_core::domain::Notification) -> Self {
        Self {
            id: Set(notification.id),
            to_user: Set(notification.to_user),
            from_user: Set(notification.from_user),
            kind: Set(notification.kind.into()),
            read: Set(notification.read),
            created_at: Set(notification.created_at.into()),
        }
    }
}
