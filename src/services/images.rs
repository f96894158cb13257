use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::image::Image;
use crate::forms::images::AddImageForm;
use crate::repository::{ImageReader, ImageWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists the image assets of the user's site, newest first.
pub fn load_images<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Image>>
where
    R: ImageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_images(user.hub_id).map_err(ServiceError::from)
}

pub fn create_image<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddImageForm,
) -> ServiceResult<Image>
where
    R: ImageWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_image = form
        .into_new_image(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_image(&new_image).map_err(ServiceError::from)
}

/// Deletes an image. Links and covers that used it lose their reference.
pub fn remove_image<R>(repo: &R, user: &AuthenticatedUser, image_id: i32) -> ServiceResult<()>
where
    R: ImageWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_image(image_id, user.hub_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::repository::mock::{MockImageReader, MockImageWriter};

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            hub_id: 9,
            name: "Tester".to_string(),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            exp: 0,
        }
    }

    #[test]
    fn load_images_requires_role() {
        let repo = MockImageReader::new();
        let user = user_with_roles(&[]);

        assert!(matches!(
            load_images(&repo, &user),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn create_image_scopes_to_site() {
        let mut repo = MockImageWriter::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_create_image()
            .times(1)
            .withf(|image| image.site_id == 9 && image.url == "/media/mug.jpg")
            .returning(|image| {
                Ok(Image {
                    id: 1,
                    site_id: image.site_id,
                    title: image.title.clone(),
                    url: image.url.clone(),
                    created_at: NaiveDateTime::default(),
                })
            });

        let form = AddImageForm {
            title: "Mug".to_string(),
            url: "/media/mug.jpg".to_string(),
        };
        let image = create_image(&repo, &user, form).expect("expected image");

        assert_eq!(image.title, "Mug");
    }

    #[test]
    fn create_image_reports_form_errors() {
        let repo = MockImageWriter::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let form = AddImageForm {
            title: "Mug".to_string(),
            url: "ftp://example.com/mug.jpg".to_string(),
        };

        assert!(matches!(
            create_image(&repo, &user, form),
            Err(ServiceError::Form(_))
        ));
    }
}
