use std::sync::Arc;

use poem::Request;
use poem_openapi::{
    OpenApi, Tags,
    param::{Path, Query},
    payload::Json,
};

use crate::api::BearerAuth;
use crate::api::helpers::{authenticated_context, present, required_field};
use crate::app_data::AppData;
use crate::coordinators::CocktailCoordinator;
use crate::errors::ResourceError;
use crate::services::TokenService;
use crate::types::dto::cocktail::{
    CocktailCreatedResponse, CocktailDetailResponse, CocktailSummaryResponse, CreateCocktailApiResponse,
    CreateCocktailRequest, UpdateCocktailRequest,
};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::catalog::{CocktailPatch, NewCocktail};

/// Cocktail catalog endpoints
pub struct CocktailApi {
    coordinator: CocktailCoordinator,
    token_service: Arc<TokenService>,
}

impl CocktailApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_service: app_data.token_service.clone(),
            coordinator: CocktailCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum CocktailTags {
    /// Cocktail catalog
    Cocktails,
}

#[OpenApi]
impl CocktailApi {
    /// List every cocktail with its ingredients
    #[oai(path = "/cocktails", method = "get", tag = "CocktailTags::Cocktails")]
    async fn list_cocktails(&self) -> Result<Json<Vec<CocktailSummaryResponse>>, ResourceError> {
        let cocktails = self.coordinator.list_cocktails().await?;

        Ok(Json(cocktails.into_iter().map(Into::into).collect()))
    }

    /// Create a cocktail; ingredients are matched or created by name
    #[oai(path = "/cocktails", method = "post", tag = "CocktailTags::Cocktails")]
    async fn create_cocktail(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateCocktailRequest>,
    ) -> Result<CreateCocktailApiResponse, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;
        let body = body.0;

        let new_cocktail = NewCocktail {
            name: required_field(body.name, "name")?,
            instructions: required_field(body.instructions, "instructions")?,
            glass_type: required_field(body.glass_type, "glass_type")?,
            ingredients: present(body.ingredients, "ingredients")?
                .into_iter()
                .map(Into::into)
                .collect(),
            image_url: body.image_url.unwrap_or_default(),
        };

        let created = self.coordinator.create_cocktail(&ctx, new_cocktail).await?;

        Ok(CreateCocktailApiResponse::Created(Json(CocktailCreatedResponse {
            message: "Cocktail created successfully".to_string(),
            id: created.cocktail.id,
        })))
    }

    /// Case-insensitive search by name and/or ingredient
    #[oai(path = "/cocktails/search", method = "get", tag = "CocktailTags::Cocktails")]
    async fn search_cocktails(
        &self,
        q: Query<Option<String>>,
        ingredient: Query<Option<String>>,
    ) -> Result<Json<Vec<CocktailSummaryResponse>>, ResourceError> {
        let cocktails = self
            .coordinator
            .search_cocktails(q.0.as_deref(), ingredient.0.as_deref())
            .await?;

        Ok(Json(cocktails.into_iter().map(Into::into).collect()))
    }

    /// Get one cocktail with its ingredients and reviews
    #[oai(path = "/cocktails/:id", method = "get", tag = "CocktailTags::Cocktails")]
    async fn get_cocktail(&self, id: Path<i32>) -> Result<Json<CocktailDetailResponse>, ResourceError> {
        let cocktail = self.coordinator.get_cocktail(id.0).await?;

        Ok(Json(cocktail.into()))
    }

    /// Update a cocktail; a supplied ingredient list replaces the existing one
    #[oai(path = "/cocktails/:id", method = "put", tag = "CocktailTags::Cocktails")]
    async fn update_cocktail(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateCocktailRequest>,
    ) -> Result<Json<MessageResponse>, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;
        let body = body.0;

        let patch = CocktailPatch {
            name: body.name,
            image_url: body.image_url,
            instructions: body.instructions,
            glass_type: body.glass_type,
            ingredients: body
                .ingredients
                .map(|lines| lines.into_iter().map(Into::into).collect()),
        };

        self.coordinator.update_cocktail(&ctx, id.0, patch).await?;

        Ok(Json(MessageResponse::new("Cocktail updated successfully")))
    }

    /// Delete a cocktail together with its reviews
    #[oai(path = "/cocktails/:id", method = "delete", tag = "CocktailTags::Cocktails")]
    async fn delete_cocktail(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ResourceError> {
        let ctx = authenticated_context(req, &auth, &self.token_service)?;

        self.coordinator.delete_cocktail(&ctx, id.0).await?;

        Ok(Json(MessageResponse::new("Cocktail deleted successfully")))
    }
}
