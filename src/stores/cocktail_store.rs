use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::sea_query::{Expr, Func, LikeExpr, Query, SimpleExpr};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::errors::internal::CocktailError;
use crate::stores::{IngredientStore, ReviewStore};
use crate::types::db::{cocktail, cocktail_ingredient, ingredient, review};
use crate::types::internal::catalog::{CocktailDetails, CocktailPatch, IngredientAmount, IngredientEntry, NewCocktail};

/// Escape character for LIKE patterns built from user input
const LIKE_ESCAPE: char = '!';

/// CocktailStore manages cocktails and their ingredient lines
///
/// Ingredient lines are never edited in place: an update that supplies an
/// ingredient list deletes every existing line and recreates them.
pub struct CocktailStore {
    ingredient_store: Arc<IngredientStore>,
    review_store: Arc<ReviewStore>,
}

impl CocktailStore {
    pub fn new(ingredient_store: Arc<IngredientStore>, review_store: Arc<ReviewStore>) -> Self {
        Self {
            ingredient_store,
            review_store,
        }
    }

    /// All cocktails with their ingredient lines, ordered by id
    pub async fn list_cocktails<C>(&self, conn: &C) -> Result<Vec<CocktailDetails>, InternalError>
    where
        C: ConnectionTrait,
    {
        let cocktails = cocktail::Entity::find()
            .order_by_asc(cocktail::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_cocktails", e))?;

        self.with_ingredients(conn, cocktails).await
    }

    /// One cocktail with its ingredient lines and reviews
    ///
    /// # Returns
    /// * `Ok(CocktailDetails)` - The cocktail, reviews included
    /// * `Err(CocktailError::CocktailNotFound)` - No such cocktail
    pub async fn get_cocktail<C>(&self, conn: &C, cocktail_id: i32) -> Result<CocktailDetails, InternalError>
    where
        C: ConnectionTrait,
    {
        let cocktail = self.find_cocktail(conn, cocktail_id).await?;
        let ingredients = self.ingredient_lines(conn, &[cocktail_id]).await?.remove(&cocktail_id);
        let reviews = self.review_store.list_for_cocktail(conn, cocktail_id).await?;

        Ok(CocktailDetails {
            cocktail,
            ingredients: ingredients.unwrap_or_default(),
            reviews,
        })
    }

    /// Create a cocktail and link its ingredients, reusing ingredient rows by exact name
    ///
    /// Every ingredient entry must have a name; the check runs before anything is written.
    pub async fn create_cocktail<C>(&self, conn: &C, new_cocktail: NewCocktail) -> Result<CocktailDetails, InternalError>
    where
        C: ConnectionTrait,
    {
        Self::validate_ingredients(&new_cocktail.ingredients)?;

        let cocktail = cocktail::ActiveModel {
            name: Set(new_cocktail.name),
            image_url: Set(new_cocktail.image_url),
            instructions: Set(new_cocktail.instructions),
            glass_type: Set(new_cocktail.glass_type),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("create_cocktail", e))?;

        let ingredients = self.attach_ingredients(conn, cocktail.id, &new_cocktail.ingredients).await?;

        Ok(CocktailDetails {
            cocktail,
            ingredients,
            reviews: Vec::new(),
        })
    }

    /// Apply a partial update to a cocktail
    ///
    /// Scalar fields absent from the patch keep their value. A present
    /// ingredient list replaces all existing lines.
    pub async fn update_cocktail<C>(
        &self,
        conn: &C,
        cocktail_id: i32,
        patch: CocktailPatch,
    ) -> Result<CocktailDetails, InternalError>
    where
        C: ConnectionTrait,
    {
        let existing = self.find_cocktail(conn, cocktail_id).await?;
        if let Some(entries) = &patch.ingredients {
            Self::validate_ingredients(entries)?;
        }

        let mut active: cocktail::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(instructions) = patch.instructions {
            active.instructions = Set(instructions);
        }
        if let Some(glass_type) = patch.glass_type {
            active.glass_type = Set(glass_type);
        }
        if active.is_changed() {
            active
                .update(conn)
                .await
                .map_err(|e| InternalError::database("update_cocktail", e))?;
        }

        if let Some(entries) = patch.ingredients {
            cocktail_ingredient::Entity::delete_many()
                .filter(cocktail_ingredient::Column::CocktailId.eq(cocktail_id))
                .exec(conn)
                .await
                .map_err(|e| InternalError::database("clear_cocktail_ingredients", e))?;

            self.attach_ingredients(conn, cocktail_id, &entries).await?;
        }

        self.get_cocktail(conn, cocktail_id).await
    }

    /// Delete a cocktail after its reviews and ingredient lines
    pub async fn delete_cocktail<C>(&self, conn: &C, cocktail_id: i32) -> Result<(), InternalError>
    where
        C: ConnectionTrait,
    {
        self.find_cocktail(conn, cocktail_id).await?;

        review::Entity::delete_many()
            .filter(review::Column::CocktailId.eq(cocktail_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_cocktail_reviews", e))?;

        cocktail_ingredient::Entity::delete_many()
            .filter(cocktail_ingredient::Column::CocktailId.eq(cocktail_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_cocktail_ingredients", e))?;

        cocktail::Entity::delete_by_id(cocktail_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_cocktail", e))?;

        Ok(())
    }

    /// Case-insensitive substring search on cocktail name and/or ingredient name
    ///
    /// Both filters are optional and are ANDed. A cocktail matching through
    /// several ingredients is returned once. Results are ordered by id.
    pub async fn search_cocktails<C>(
        &self,
        conn: &C,
        name: Option<&str>,
        ingredient_name: Option<&str>,
    ) -> Result<Vec<CocktailDetails>, InternalError>
    where
        C: ConnectionTrait,
    {
        let mut select = cocktail::Entity::find();

        if let Some(term) = name {
            select = select.filter(contains_ignore_case(
                Expr::col((cocktail::Entity, cocktail::Column::Name)),
                term,
            ));
        }

        if let Some(term) = ingredient_name {
            let matching_cocktails = Query::select()
                .column((cocktail_ingredient::Entity, cocktail_ingredient::Column::CocktailId))
                .from(cocktail_ingredient::Entity)
                .inner_join(
                    ingredient::Entity,
                    Expr::col((ingredient::Entity, ingredient::Column::Id))
                        .equals((cocktail_ingredient::Entity, cocktail_ingredient::Column::IngredientId)),
                )
                .and_where(contains_ignore_case(
                    Expr::col((ingredient::Entity, ingredient::Column::Name)),
                    term,
                ))
                .to_owned();

            select = select.filter(cocktail::Column::Id.in_subquery(matching_cocktails));
        }

        let cocktails = select
            .order_by_asc(cocktail::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("search_cocktails", e))?;

        self.with_ingredients(conn, cocktails).await
    }

    async fn find_cocktail<C>(&self, conn: &C, cocktail_id: i32) -> Result<cocktail::Model, InternalError>
    where
        C: ConnectionTrait,
    {
        cocktail::Entity::find_by_id(cocktail_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_cocktail", e))?
            .ok_or_else(|| CocktailError::CocktailNotFound { cocktail_id }.into())
    }

    async fn attach_ingredients<C>(
        &self,
        conn: &C,
        cocktail_id: i32,
        entries: &[IngredientEntry],
    ) -> Result<Vec<IngredientAmount>, InternalError>
    where
        C: ConnectionTrait,
    {
        let mut attached = Vec::with_capacity(entries.len());

        for entry in entries {
            let ingredient = self.ingredient_store.find_or_create(conn, &entry.name).await?;

            cocktail_ingredient::ActiveModel {
                cocktail_id: Set(cocktail_id),
                ingredient_id: Set(ingredient.id),
                amount: Set(entry.amount.clone()),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("link_cocktail_ingredient", e))?;

            attached.push(IngredientAmount {
                name: ingredient.name,
                amount: entry.amount.clone(),
            });
        }

        Ok(attached)
    }

    /// Ingredient lines for the given cocktails, keyed by cocktail id, in insertion order
    async fn ingredient_lines<C>(
        &self,
        conn: &C,
        cocktail_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<IngredientAmount>>, InternalError>
    where
        C: ConnectionTrait,
    {
        if cocktail_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = cocktail_ingredient::Entity::find()
            .filter(cocktail_ingredient::Column::CocktailId.is_in(cocktail_ids.iter().copied()))
            .find_also_related(ingredient::Entity)
            .order_by_asc(cocktail_ingredient::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("load_cocktail_ingredients", e))?;

        let mut lines: HashMap<i32, Vec<IngredientAmount>> = HashMap::new();
        for (link, ingredient) in rows {
            let Some(ingredient) = ingredient else {
                continue;
            };
            lines.entry(link.cocktail_id).or_default().push(IngredientAmount {
                name: ingredient.name,
                amount: link.amount,
            });
        }

        Ok(lines)
    }

    async fn with_ingredients<C>(
        &self,
        conn: &C,
        cocktails: Vec<cocktail::Model>,
    ) -> Result<Vec<CocktailDetails>, InternalError>
    where
        C: ConnectionTrait,
    {
        let ids: Vec<i32> = cocktails.iter().map(|c| c.id).collect();
        let mut lines = self.ingredient_lines(conn, &ids).await?;

        Ok(cocktails
            .into_iter()
            .map(|cocktail| CocktailDetails {
                ingredients: lines.remove(&cocktail.id).unwrap_or_default(),
                cocktail,
                reviews: Vec::new(),
            })
            .collect())
    }

    fn validate_ingredients(entries: &[IngredientEntry]) -> Result<(), InternalError> {
        if entries.iter().any(|entry| entry.name.trim().is_empty()) {
            return Err(InternalError::validation("ingredients", "each ingredient requires a name"));
        }
        Ok(())
    }
}

/// `lower(column) LIKE '%term%'` with LIKE metacharacters in `term` matched literally
///
/// SQLite's `lower()` folds ASCII only, so the term is folded the same way;
/// non-ASCII letters must match in their stored case.
fn contains_ignore_case(column: Expr, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(column)).like(LikeExpr::new(like_pattern(term)).escape(LIKE_ESCAPE))
}

fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_ascii_lowercase().chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_test_cocktail, setup_test_db, test_cocktail_store};
    use sea_orm::{DatabaseConnection, PaginatorTrait};

    fn entries(pairs: &[(&str, &str)]) -> Vec<IngredientEntry> {
        pairs
            .iter()
            .map(|(amount, name)| IngredientEntry::new(*name, *amount))
            .collect()
    }

    fn new_cocktail(name: &str, ingredients: Vec<IngredientEntry>) -> NewCocktail {
        NewCocktail {
            name: name.to_string(),
            image_url: String::new(),
            instructions: "Stir".to_string(),
            glass_type: "Coupe".to_string(),
            ingredients,
        }
    }

    async fn ingredient_count(db: &DatabaseConnection) -> u64 {
        ingredient::Entity::find().count(db).await.unwrap()
    }

    async fn link_count(db: &DatabaseConnection, cocktail_id: i32) -> u64 {
        cocktail_ingredient::Entity::find()
            .filter(cocktail_ingredient::Column::CocktailId.eq(cocktail_id))
            .count(db)
            .await
            .unwrap()
    }

    fn names(details: &[CocktailDetails]) -> Vec<String> {
        details.iter().map(|d| d.cocktail.name.clone()).collect()
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("Lime"), "%lime%");
        assert_eq!(like_pattern("50%_off!"), "%50!%!_off!!%");
        assert_eq!(like_pattern(r"a\b"), r"%a\b%");
    }

    #[test]
    fn test_like_pattern_folds_ascii_only() {
        assert_eq!(like_pattern("ÉCLAIR"), "%Éclair%");
        assert_eq!(like_pattern("Épice"), "%Épice%");
    }

    #[tokio::test]
    async fn test_duplicate_ingredient_names_share_one_row() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();

        let created = store
            .create_cocktail(&db, new_cocktail("Double Gin", entries(&[("1 oz", "Gin"), ("1 oz", "Gin")])))
            .await
            .unwrap();

        assert_eq!(ingredient_count(&db).await, 1);
        assert_eq!(link_count(&db, created.cocktail.id).await, 2);
        assert_eq!(created.ingredients.len(), 2);
    }

    #[tokio::test]
    async fn test_ingredients_are_shared_across_cocktails() {
        let db = setup_test_db().await;

        create_test_cocktail(&db, "Gimlet", &["Gin", "Lime Juice"]).await;
        create_test_cocktail(&db, "Gin Fizz", &["Gin", "Soda Water"]).await;

        assert_eq!(ingredient_count(&db).await, 3);
    }

    #[tokio::test]
    async fn test_create_rejects_nameless_ingredient_without_writing() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();

        let result = store
            .create_cocktail(&db, new_cocktail("Broken", entries(&[("1 oz", "Gin"), ("1 oz", "")])))
            .await;

        assert!(matches!(result, Err(InternalError::Validation { .. })));
        assert_eq!(cocktail::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(ingredient_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_ingredient_list() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();
        let created = store
            .create_cocktail(&db, new_cocktail("Mix", entries(&[("1 oz", "A"), ("2 oz", "B")])))
            .await
            .unwrap();
        let b_before = ingredient::Entity::find()
            .filter(ingredient::Column::Name.eq("B"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();

        let patch = CocktailPatch {
            ingredients: Some(entries(&[("3 oz", "B"), ("4 oz", "C")])),
            ..Default::default()
        };
        let updated = store.update_cocktail(&db, created.cocktail.id, patch).await.unwrap();

        let line_names: Vec<&str> = updated.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(line_names, vec!["B", "C"]);
        assert_eq!(updated.ingredients[0].amount, "3 oz");
        assert_eq!(link_count(&db, created.cocktail.id).await, 2);

        let b_after = ingredient::Entity::find()
            .filter(ingredient::Column::Name.eq("B"))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(b_after.len(), 1);
        assert_eq!(b_after[0].id, b_before.id);
        assert_eq!(ingredient_count(&db).await, 3);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_missing_fields_and_ingredients() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();
        let created = create_test_cocktail(&db, "Negroni", &["Gin", "Campari", "Vermouth"]).await;

        let patch = CocktailPatch {
            glass_type: Some("Rocks".to_string()),
            ..Default::default()
        };
        let updated = store.update_cocktail(&db, created.cocktail.id, patch).await.unwrap();

        assert_eq!(updated.cocktail.name, "Negroni");
        assert_eq!(updated.cocktail.instructions, created.cocktail.instructions);
        assert_eq!(updated.cocktail.glass_type, "Rocks");
        assert_eq!(updated.ingredients.len(), 3);
    }

    #[tokio::test]
    async fn test_update_missing_cocktail_is_not_found() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();

        let result = store.update_cocktail(&db, 42, CocktailPatch::default()).await;

        assert!(matches!(
            result,
            Err(InternalError::Cocktail(CocktailError::CocktailNotFound { cocktail_id: 42 }))
        ));
    }

    #[tokio::test]
    async fn test_delete_cocktail_removes_links_and_keeps_ingredients() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();
        let created = create_test_cocktail(&db, "Daiquiri", &["White Rum", "Lime Juice"]).await;

        store.delete_cocktail(&db, created.cocktail.id).await.unwrap();

        assert_eq!(link_count(&db, created.cocktail.id).await, 0);
        assert_eq!(ingredient_count(&db).await, 2);
        assert!(matches!(
            store.get_cocktail(&db, created.cocktail.id).await,
            Err(InternalError::Cocktail(CocktailError::CocktailNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_search_by_ingredient_is_case_insensitive_and_deduplicated() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();
        create_test_cocktail(&db, "Margarita", &["Tequila", "Lime Juice", "Triple Sec"]).await;
        create_test_cocktail(&db, "Mojito", &["White Rum", "Lime", "Fresh Lime Juice"]).await;
        create_test_cocktail(&db, "Old Fashioned", &["Bourbon", "Bitters"]).await;
        create_test_cocktail(&db, "Key LIME Pie", &["Vanilla Vodka", "KEY LIME Liqueur"]).await;

        let found = store.search_cocktails(&db, None, Some("lime")).await.unwrap();

        assert_eq!(names(&found), vec!["Margarita", "Mojito", "Key LIME Pie"]);
        assert_eq!(found[1].ingredients.len(), 3);
    }

    #[tokio::test]
    async fn test_search_filters_combine_with_and() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();
        create_test_cocktail(&db, "Gin Gimlet", &["Gin", "Lime Juice"]).await;
        create_test_cocktail(&db, "Gin Martini", &["Gin", "Dry Vermouth"]).await;
        create_test_cocktail(&db, "Vodka Gimlet", &["Vodka", "Lime Juice"]).await;

        let by_name = store.search_cocktails(&db, Some("GIN"), None).await.unwrap();
        let both = store.search_cocktails(&db, Some("gin"), Some("lime")).await.unwrap();
        let neither = store.search_cocktails(&db, None, None).await.unwrap();

        assert_eq!(names(&by_name), vec!["Gin Gimlet", "Gin Martini"]);
        assert_eq!(names(&both), vec!["Gin Gimlet"]);
        assert_eq!(neither.len(), 3);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();
        create_test_cocktail(&db, "100% Agave", &["Tequila"]).await;
        create_test_cocktail(&db, "Plain", &["Water"]).await;

        let percent = store.search_cocktails(&db, Some("%"), None).await.unwrap();
        let underscore = store.search_cocktails(&db, Some("_"), None).await.unwrap();

        assert_eq!(names(&percent), vec!["100% Agave"]);
        assert!(underscore.is_empty());
    }

    #[tokio::test]
    async fn test_search_matches_non_ascii_names_as_stored() {
        let db = setup_test_db().await;
        let store = test_cocktail_store();
        create_test_cocktail(&db, "ÉCLAIR FIZZ", &["ÉPICE SYRUP", "Soda Water"]).await;
        create_test_cocktail(&db, "Plain", &["Water"]).await;

        let exact_name = store.search_cocktails(&db, Some("ÉCLAIR"), None).await.unwrap();
        let ascii_case_changed = store.search_cocktails(&db, Some("Éclair fizz"), None).await.unwrap();
        let exact_ingredient = store.search_cocktails(&db, None, Some("ÉPICE")).await.unwrap();
        let ingredient_ascii_lower = store.search_cocktails(&db, None, Some("Épice syrup")).await.unwrap();

        assert_eq!(names(&exact_name), vec!["ÉCLAIR FIZZ"]);
        assert_eq!(names(&ascii_case_changed), vec!["ÉCLAIR FIZZ"]);
        assert_eq!(names(&exact_ingredient), vec!["ÉCLAIR FIZZ"]);
        assert_eq!(names(&ingredient_ascii_lower), vec!["ÉCLAIR FIZZ"]);
    }
}
