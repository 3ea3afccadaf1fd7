use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create cocktails table
        manager
            .create_table(
                Table::create()
                    .table(Cocktails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cocktails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cocktails::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Cocktails::ImageUrl).string().not_null().default(""))
                    .col(ColumnDef::new(Cocktails::Instructions).text().not_null())
                    .col(ColumnDef::new(Cocktails::GlassType).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        // Create ingredients table; names are shared across cocktails
        manager
            .create_table(
                Table::create()
                    .table(Ingredients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ingredients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ingredients::Name).string_len(100).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // Create cocktail_ingredients join table.
        // Links carry their own id so the same ingredient may appear twice in one cocktail.
        manager
            .create_table(
                Table::create()
                    .table(CocktailIngredients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CocktailIngredients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CocktailIngredients::CocktailId).integer().not_null())
                    .col(ColumnDef::new(CocktailIngredients::IngredientId).integer().not_null())
                    .col(ColumnDef::new(CocktailIngredients::Amount).string_len(50).not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cocktail_ingredients_cocktail_id")
                            .from(CocktailIngredients::Table, CocktailIngredients::CocktailId)
                            .to(Cocktails::Table, Cocktails::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cocktail_ingredients_ingredient_id")
                            .from(CocktailIngredients::Table, CocktailIngredients::IngredientId)
                            .to(Ingredients::Table, Ingredients::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cocktail_ingredients_cocktail_id")
                    .table(CocktailIngredients::Table)
                    .col(CocktailIngredients::CocktailId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CocktailIngredients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ingredients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cocktails::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Cocktails {
    Table,
    Id,
    Name,
    ImageUrl,
    Instructions,
    GlassType,
}

#[derive(DeriveIden)]
enum Ingredients {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum CocktailIngredients {
    Table,
    Id,
    CocktailId,
    IngredientId,
    Amount,
}
