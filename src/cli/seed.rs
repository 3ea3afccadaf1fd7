use sea_orm::{ConnectionTrait, EntityTrait};

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::errors::InternalError;
use crate::types::db::{cocktail, cocktail_ingredient, ingredient, review, user};
use crate::types::internal::catalog::{IngredientEntry, NewCocktail};
use crate::types::internal::context::RequestContext;

struct UserFixture {
    username: &'static str,
    email: &'static str,
    password: &'static str,
}

struct CocktailFixture {
    name: &'static str,
    image_url: &'static str,
    instructions: &'static str,
    glass_type: &'static str,
    /// (amount, ingredient name)
    ingredients: &'static [(&'static str, &'static str)],
}

struct ReviewFixture {
    /// Index into COCKTAILS
    cocktail: usize,
    /// Index into USERS
    author: usize,
    content: &'static str,
    rating: i32,
}

const USERS: &[UserFixture] = &[
    UserFixture {
        username: "cocktail_lover",
        email: "cocktail@example.com",
        password: "mixology123",
    },
    UserFixture {
        username: "bar_enthusiast",
        email: "bar@example.com",
        password: "cheers456",
    },
    UserFixture {
        username: "drink_master",
        email: "master@example.com",
        password: "spirits789",
    },
];

const COCKTAILS: &[CocktailFixture] = &[
    CocktailFixture {
        name: "Classic Mojito",
        image_url: "https://images.unsplash.com/photo-1551538827-9c037cb4f32a",
        instructions: "Muddle mint leaves with sugar and lime juice. Add rum and fill glass with crushed ice. Top with club soda and garnish with mint sprig.",
        glass_type: "Highball",
        ingredients: &[
            ("2 oz", "White rum"),
            ("1 oz", "Fresh lime juice"),
            ("0.75 oz", "Simple syrup"),
            ("6-8", "Fresh mint leaves"),
            ("2 oz", "Club soda"),
            ("1", "Mint sprig for garnish"),
        ],
    },
    CocktailFixture {
        name: "Espresso Martini",
        image_url: "https://images.unsplash.com/photo-1545438102-799c3991ffb2",
        instructions: "Shake vodka, coffee liqueur, and fresh espresso with ice. Strain into chilled martini glass. Garnish with coffee beans.",
        glass_type: "Martini",
        ingredients: &[
            ("2 oz", "Vodka"),
            ("1 oz", "Coffee liqueur"),
            ("1 oz", "Fresh espresso"),
            ("0.5 oz", "Simple syrup"),
            ("3", "Coffee beans for garnish"),
        ],
    },
    CocktailFixture {
        name: "Negroni",
        image_url: "https://images.unsplash.com/photo-1570598912132-0ba1dc952b7d",
        instructions: "Stir gin, Campari, and sweet vermouth with ice. Strain into rocks glass over large ice cube. Garnish with orange peel.",
        glass_type: "Rocks",
        ingredients: &[
            ("1 oz", "Gin"),
            ("1 oz", "Campari"),
            ("1 oz", "Sweet vermouth"),
            ("1", "Orange peel for garnish"),
        ],
    },
    CocktailFixture {
        name: "Passion Fruit Margarita",
        image_url: "https://images.unsplash.com/photo-1556855810-ac404aa91e85",
        instructions: "Shake tequila, passion fruit puree, lime juice, and triple sec with ice. Strain into salt-rimmed glass. Garnish with lime wheel.",
        glass_type: "Margarita",
        ingredients: &[
            ("2 oz", "Tequila"),
            ("1 oz", "Passion fruit puree"),
            ("0.75 oz", "Fresh lime juice"),
            ("0.5 oz", "Triple sec"),
            ("", "Salt for rim"),
            ("1", "Lime wheel for garnish"),
        ],
    },
    CocktailFixture {
        name: "Old Fashioned",
        image_url: "https://images.unsplash.com/photo-1470337458703-46ad1756a187",
        instructions: "Muddle sugar cube with bitters and splash of water. Add bourbon and stir with ice. Garnish with orange peel and cherry.",
        glass_type: "Rocks",
        ingredients: &[
            ("2 oz", "Bourbon"),
            ("1", "Sugar cube"),
            ("2-3 dashes", "Angostura bitters"),
            ("1", "Orange peel"),
            ("1", "Maraschino cherry"),
        ],
    },
    CocktailFixture {
        name: "French 75",
        image_url: "https://images.unsplash.com/photo-1556679343-c7306c1976bc",
        instructions: "Shake gin, lemon juice, and simple syrup with ice. Strain into champagne flute and top with champagne. Garnish with lemon twist.",
        glass_type: "Champagne Flute",
        ingredients: &[
            ("1.5 oz", "Gin"),
            ("0.75 oz", "Fresh lemon juice"),
            ("0.5 oz", "Simple syrup"),
            ("3 oz", "Champagne"),
            ("1", "Lemon twist for garnish"),
        ],
    },
    CocktailFixture {
        name: "Piña Colada",
        image_url: "https://images.unsplash.com/photo-1582633987110-6b4ca43e9a49",
        instructions: "Blend rum, coconut cream, pineapple juice, and ice until smooth. Pour into glass and garnish with pineapple wedge and cherry.",
        glass_type: "Hurricane",
        ingredients: &[
            ("2 oz", "White rum"),
            ("2 oz", "Coconut cream"),
            ("2 oz", "Pineapple juice"),
            ("1.5 cups", "Crushed ice"),
            ("1", "Pineapple wedge"),
            ("1", "Maraschino cherry"),
        ],
    },
    CocktailFixture {
        name: "Moscow Mule",
        image_url: "https://images.unsplash.com/photo-1514362545857-3bc16c4c7d1b",
        instructions: "Combine vodka and lime juice in copper mug with ice. Top with ginger beer and garnish with lime wheel and mint sprig.",
        glass_type: "Copper Mug",
        ingredients: &[
            ("2 oz", "Vodka"),
            ("0.5 oz", "Fresh lime juice"),
            ("4 oz", "Ginger beer"),
            ("1", "Lime wheel"),
            ("1", "Mint sprig"),
        ],
    },
    CocktailFixture {
        name: "Cosmopolitan",
        image_url: "https://images.unsplash.com/photo-1560512823-829485b8bf24",
        instructions: "Shake vodka, cranberry juice, lime juice, and triple sec with ice. Strain into martini glass and garnish with lime wheel.",
        glass_type: "Martini",
        ingredients: &[
            ("1.5 oz", "Citrus vodka"),
            ("1 oz", "Cranberry juice"),
            ("0.5 oz", "Fresh lime juice"),
            ("0.5 oz", "Triple sec"),
            ("1", "Lime wheel for garnish"),
        ],
    },
    CocktailFixture {
        name: "Mai Tai",
        image_url: "https://images.unsplash.com/photo-1549746423-e5fe9cafded8",
        instructions: "Shake rums, orange curacao, orgeat, and lime juice with ice. Strain into glass filled with crushed ice. Float dark rum on top.",
        glass_type: "Rocks",
        ingredients: &[
            ("2 oz", "White rum"),
            ("0.5 oz", "Orange curacao"),
            ("0.5 oz", "Orgeat syrup"),
            ("1 oz", "Fresh lime juice"),
            ("0.5 oz", "Dark rum float"),
            ("1", "Mint sprig for garnish"),
        ],
    },
    CocktailFixture {
        name: "Aviation",
        image_url: "https://images.unsplash.com/photo-1527761939622-9119e4eec134",
        instructions: "Shake gin, maraschino liqueur, creme de violette, and lemon juice with ice. Strain into cocktail glass. Garnish with cherry.",
        glass_type: "Coupe",
        ingredients: &[
            ("2 oz", "Gin"),
            ("0.5 oz", "Maraschino liqueur"),
            ("0.25 oz", "Creme de violette"),
            ("0.75 oz", "Fresh lemon juice"),
            ("1", "Maraschino cherry for garnish"),
        ],
    },
    CocktailFixture {
        name: "Whiskey Sour",
        image_url: "https://images.unsplash.com/photo-1514362453360-8f2671dd9802",
        instructions: "Shake whiskey, lemon juice, simple syrup, and optional egg white with ice. Strain into rocks glass over ice. Garnish with orange slice and cherry.",
        glass_type: "Rocks",
        ingredients: &[
            ("2 oz", "Bourbon"),
            ("1 oz", "Fresh lemon juice"),
            ("0.75 oz", "Simple syrup"),
            ("1", "Egg white (optional)"),
            ("1", "Orange slice"),
            ("1", "Maraschino cherry"),
        ],
    },
    CocktailFixture {
        name: "Gin Basil Smash",
        image_url: "https://images.unsplash.com/photo-1558950334-8d04704332f8",
        instructions: "Muddle basil leaves with simple syrup. Add gin and lemon juice, shake with ice. Double strain into rocks glass over ice. Garnish with basil leaf.",
        glass_type: "Rocks",
        ingredients: &[
            ("2 oz", "Gin"),
            ("1 oz", "Fresh lemon juice"),
            ("0.75 oz", "Simple syrup"),
            ("8-10", "Fresh basil leaves"),
            ("1", "Basil leaf for garnish"),
        ],
    },
];

const REVIEWS: &[ReviewFixture] = &[
    ReviewFixture {
        cocktail: 0,
        author: 0,
        content: "Perfect summer drink! The mint makes it so refreshing.",
        rating: 5,
    },
    ReviewFixture {
        cocktail: 1,
        author: 1,
        content: "Best espresso martini I've ever made at home. Perfect balance!",
        rating: 5,
    },
    ReviewFixture {
        cocktail: 2,
        author: 2,
        content: "A classic for a reason. Perfect balance of bitter and sweet.",
        rating: 4,
    },
    ReviewFixture {
        cocktail: 3,
        author: 0,
        content: "The passion fruit adds an amazing tropical twist!",
        rating: 5,
    },
    ReviewFixture {
        cocktail: 4,
        author: 1,
        content: "You can't go wrong with a well-made Old Fashioned.",
        rating: 5,
    },
];

/// Row counts written by a seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub cocktails: usize,
    pub reviews: usize,
}

/// Replace every row with the fixture set in a single transaction
///
/// Existing data is cleared in dependency order first. If any step fails
/// the database is left as it was.
pub async fn seed_database(app_data: &AppData) -> Result<SeedSummary, InternalError> {
    let ctx = RequestContext::for_cli("seed");
    tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor(), "Starting the seeding process...");
    let txn = app_data.connections.begin_transaction().await?;

    clear_all(&txn).await?;
    tracing::info!(request_id = %ctx.request_id, "Existing data cleared");

    let mut user_ids = Vec::with_capacity(USERS.len());
    for fixture in USERS {
        let user = app_data
            .user_store
            .create_user(&txn, fixture.username, fixture.email, fixture.password)
            .await?;
        user_ids.push(user.id);
    }

    let mut cocktail_ids = Vec::with_capacity(COCKTAILS.len());
    for fixture in COCKTAILS {
        let created = app_data
            .cocktail_store
            .create_cocktail(&txn, fixture.to_new_cocktail())
            .await?;
        cocktail_ids.push(created.cocktail.id);
    }

    for fixture in REVIEWS {
        app_data
            .review_store
            .create_review(
                &txn,
                cocktail_ids[fixture.cocktail],
                user_ids[fixture.author],
                fixture.content,
                Some(fixture.rating),
            )
            .await?;
    }

    DatabaseConnections::commit_transaction(txn).await?;

    for fixture in USERS {
        tracing::info!(request_id = %ctx.request_id, "Seeded user: {}", fixture.username);
    }

    Ok(SeedSummary {
        users: user_ids.len(),
        cocktails: cocktail_ids.len(),
        reviews: REVIEWS.len(),
    })
}

impl CocktailFixture {
    fn to_new_cocktail(&self) -> NewCocktail {
        NewCocktail {
            name: self.name.to_string(),
            image_url: self.image_url.to_string(),
            instructions: self.instructions.to_string(),
            glass_type: self.glass_type.to_string(),
            ingredients: self
                .ingredients
                .iter()
                .map(|(amount, name)| IngredientEntry::new(*name, *amount))
                .collect(),
        }
    }
}

async fn clear_all<C>(conn: &C) -> Result<(), InternalError>
where
    C: ConnectionTrait,
{
    review::Entity::delete_many()
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("clear_reviews", e))?;
    cocktail_ingredient::Entity::delete_many()
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("clear_cocktail_ingredients", e))?;
    cocktail::Entity::delete_many()
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("clear_cocktails", e))?;
    ingredient::Entity::delete_many()
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("clear_ingredients", e))?;
    user::Entity::delete_many()
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("clear_users", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_app_data;
    use sea_orm::PaginatorTrait;

    #[test]
    fn test_fixtures_reference_existing_rows() {
        for fixture in REVIEWS {
            assert!(fixture.cocktail < COCKTAILS.len());
            assert!(fixture.author < USERS.len());
            assert!((1..=5).contains(&fixture.rating));
        }
        for fixture in COCKTAILS {
            assert!(fixture.ingredients.iter().all(|(_, name)| !name.is_empty()));
        }
    }

    #[tokio::test]
    async fn test_seed_is_repeatable() {
        let app_data = setup_test_app_data().await;

        let first = seed_database(&app_data).await.unwrap();
        let second = seed_database(&app_data).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.cocktails, 13);

        let db = &app_data.connections.catalog;
        assert_eq!(user::Entity::find().count(db).await.unwrap(), 3);
        assert_eq!(cocktail::Entity::find().count(db).await.unwrap(), 13);
        assert_eq!(review::Entity::find().count(db).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_seeded_ingredients_are_shared() {
        let app_data = setup_test_app_data().await;
        seed_database(&app_data).await.unwrap();

        let db = &app_data.connections.catalog;
        let simple_syrup = app_data
            .cocktail_store
            .search_cocktails(db, None, Some("simple syrup"))
            .await
            .unwrap();
        let ingredients = app_data.ingredient_store.list_ingredients(db).await.unwrap();

        assert_eq!(simple_syrup.len(), 5);
        assert_eq!(ingredients.iter().filter(|i| i.name == "Simple syrup").count(), 1);
    }

    #[tokio::test]
    async fn test_seeded_users_can_log_in() {
        let app_data = setup_test_app_data().await;
        seed_database(&app_data).await.unwrap();

        let user = app_data
            .user_store
            .authenticate(&app_data.connections.catalog, "drink_master", "spirits789")
            .await
            .unwrap();

        assert_eq!(user.email, "master@example.com");
    }
}
