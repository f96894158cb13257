use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::redirect;

use crate::forms::collections::AddCollectionForm;
use crate::forms::custom_fields::AddCustomFieldForm;
use crate::forms::images::AddImageLinkForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::collections::{
    add_collection_custom_field, add_collection_image, create_collection,
};

fn editor_url(collection_id: i32) -> String {
    format!("/admin/pages/{collection_id}")
}

#[post("/collections/add")]
pub async fn add_collection(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCollectionForm>,
) -> impl Responder {
    let parent_url = editor_url(form.parent_id);

    match create_collection(repo.get_ref(), &user, form) {
        Ok(collection) => {
            FlashMessage::success(format!("Collection «{}» created.", collection.name)).send();
            redirect(&editor_url(collection.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&parent_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Parent page not found.").send();
            redirect("/admin/")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A collection with this name or address already exists.").send();
            redirect(&parent_url)
        }
        Err(err) => {
            log::error!("Failed to create collection: {err}");
            FlashMessage::error("Failed to create the collection.").send();
            redirect(&parent_url)
        }
    }
}

#[post("/collections/{collection_id}/fields/add")]
pub async fn add_collection_field(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCustomFieldForm>,
) -> impl Responder {
    let collection_id = path.into_inner();

    match add_collection_custom_field(repo.get_ref(), &user, collection_id, form) {
        Ok(field) => {
            FlashMessage::success(format!("Field «{}» added.", field.name)).send();
            redirect(&editor_url(collection_id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&editor_url(collection_id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Collection not found.").send();
            redirect("/admin/")
        }
        Err(err) => {
            log::error!("Failed to add field to collection {collection_id}: {err}");
            FlashMessage::error("Failed to add the field.").send();
            redirect(&editor_url(collection_id))
        }
    }
}

#[post("/collections/{collection_id}/images/add")]
pub async fn add_collection_gallery_image(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddImageLinkForm>,
) -> impl Responder {
    let collection_id = path.into_inner();

    match add_collection_image(repo.get_ref(), &user, collection_id, form) {
        Ok(_) => {
            FlashMessage::success("Image added.").send();
            redirect(&editor_url(collection_id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&editor_url(collection_id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Collection not found.").send();
            redirect("/admin/")
        }
        Err(err) => {
            log::error!("Failed to add image to collection {collection_id}: {err}");
            FlashMessage::error("Failed to add the image.").send();
            redirect(&editor_url(collection_id))
        }
    }
}
