use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::collection::ProductCollection;
use crate::domain::custom_field::{CustomField, CustomFieldView, into_views};
use crate::domain::image::{CollectionImage, Image};
use crate::forms::collections::AddCollectionForm;
use crate::forms::custom_fields::AddCustomFieldForm;
use crate::forms::images::AddImageLinkForm;
use crate::repository::{CollectionReader, CollectionWriter, ImageReader, PageReader};
use crate::services::products::ensure_image;
use crate::services::tree::ensure_url_path_free;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the collection editor.
#[derive(Debug, Serialize)]
pub struct CollectionEditorData {
    pub collection: ProductCollection,
    pub custom_fields: Vec<CustomFieldView>,
    pub collection_images: Vec<CollectionImage>,
    pub images: Vec<Image>,
}

pub fn load_collection_editor<R>(
    repo: &R,
    user: &AuthenticatedUser,
    collection_id: i32,
) -> ServiceResult<CollectionEditorData>
where
    R: CollectionReader + ImageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let collection = find_collection(repo, user.hub_id, collection_id)?;

    let custom_fields = repo
        .list_collection_custom_fields(collection.id)
        .map_err(ServiceError::from)?;
    let collection_images = repo
        .list_collection_images(collection.id)
        .map_err(ServiceError::from)?;
    let images = repo.list_images(user.hub_id).map_err(ServiceError::from)?;

    Ok(CollectionEditorData {
        collection,
        custom_fields: into_views(custom_fields),
        collection_images,
        images,
    })
}

/// Creates a collection page. Collection names are unique across sites.
pub fn create_collection<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCollectionForm,
) -> ServiceResult<ProductCollection>
where
    R: PageReader + CollectionReader + CollectionWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_collection = form
        .into_new_collection(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let name_taken = repo
        .get_collection_by_name(&new_collection.name)
        .map_err(ServiceError::from)?;
    if name_taken.is_some() {
        return Err(ServiceError::Conflict);
    }

    ensure_url_path_free(repo, &new_collection.page)?;

    repo.create_collection(&new_collection)
        .map_err(ServiceError::from)
}

pub fn add_collection_custom_field<R>(
    repo: &R,
    user: &AuthenticatedUser,
    collection_id: i32,
    form: AddCustomFieldForm,
) -> ServiceResult<CustomField>
where
    R: CollectionReader + CollectionWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let collection = find_collection(repo, user.hub_id, collection_id)?;

    let field = form
        .into_new_custom_field(collection.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.add_collection_custom_field(&field)
        .map_err(ServiceError::from)
}

pub fn add_collection_image<R>(
    repo: &R,
    user: &AuthenticatedUser,
    collection_id: i32,
    form: AddImageLinkForm,
) -> ServiceResult<CollectionImage>
where
    R: CollectionReader + CollectionWriter + ImageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let collection = find_collection(repo, user.hub_id, collection_id)?;

    let link = form
        .into_new_link(collection.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(image_id) = link.image_id {
        ensure_image(repo, user.hub_id, image_id)?;
    }

    repo.add_collection_image(&link).map_err(ServiceError::from)
}

fn find_collection<R>(
    repo: &R,
    site_id: i32,
    collection_id: i32,
) -> ServiceResult<ProductCollection>
where
    R: CollectionReader + ?Sized,
{
    repo.get_collection_by_id(collection_id, site_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}
