use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cocktails")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// May be empty when no image is known
    pub image_url: String,
    #[sea_orm(column_type = "Text")]
    pub instructions: String,
    pub glass_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cocktail_ingredient::Entity")]
    CocktailIngredient,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
}

impl Related<super::cocktail_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CocktailIngredient.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
