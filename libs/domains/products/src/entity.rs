use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{Product, ProductInput};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub price: i32,
    pub buying_price: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const TAG: &'static str = "products";
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            buying_price: model.buying_price,
        }
    }
}

/// Insert form: the id is left to the sequence.
impl From<ProductInput> for ActiveModel {
    fn from(input: ProductInput) -> Self {
        Self {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            buying_price: Set(input.buying_price),
        }
    }
}
