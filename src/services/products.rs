use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::collection::{CollectionListQuery, ProductCollection};
use crate::domain::custom_field::{CustomField, CustomFieldView, into_views};
use crate::domain::image::{Image, ProductImage};
use crate::domain::product::Product;
use crate::forms::custom_fields::AddCustomFieldForm;
use crate::forms::images::AddImageLinkForm;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::{
    CollectionReader, ImageReader, PageReader, ProductReader, ProductWriter,
};
use crate::services::tree::ensure_url_path_free;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the product editor.
#[derive(Debug, Serialize)]
pub struct ProductEditorData {
    pub product: Product,
    pub price: String,
    pub custom_fields: Vec<CustomFieldView>,
    pub product_images: Vec<ProductImage>,
    /// Collections the product may be assigned to.
    pub collections: Vec<ProductCollection>,
    /// Images available for the cover and the gallery.
    pub images: Vec<Image>,
}

/// Loads a product with its fields, gallery and the pickers' options.
pub fn load_product_editor<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<ProductEditorData>
where
    R: ProductReader + CollectionReader + ImageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = find_product(repo, user.hub_id, product_id)?;

    let custom_fields = repo
        .list_product_custom_fields(product.id)
        .map_err(ServiceError::from)?;
    let product_images = repo
        .list_product_images(&[product.id])
        .map_err(ServiceError::from)?;
    let collections = repo
        .list_collections(CollectionListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;
    let images = repo.list_images(user.hub_id).map_err(ServiceError::from)?;

    Ok(ProductEditorData {
        price: product.price().to_string(),
        product,
        custom_fields: into_views(custom_fields),
        product_images,
        collections,
        images,
    })
}

/// Creates a product page beneath an existing page of the user's site.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: PageReader + ProductWriter + CollectionReader + ImageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_product = form
        .into_new_product(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_references(repo, user.hub_id, new_product.image_id, new_product.collection_id)?;
    ensure_url_path_free(repo, &new_product.page)?;

    repo.create_product(&new_product)
        .map_err(ServiceError::from)
}

/// Updates the catalog data of a product.
pub fn modify_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + CollectionReader + ImageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let update = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_references(repo, user.hub_id, update.image_id, update.collection_id)?;

    repo.update_product(product_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Appends a custom field to a product.
pub fn add_product_custom_field<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: AddCustomFieldForm,
) -> ServiceResult<CustomField>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = find_product(repo, user.hub_id, product_id)?;

    let field = form
        .into_new_custom_field(product.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.add_product_custom_field(&field)
        .map_err(ServiceError::from)
}

/// Appends an image to a product's gallery.
pub fn add_product_image<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: AddImageLinkForm,
) -> ServiceResult<ProductImage>
where
    R: ProductReader + ProductWriter + ImageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = find_product(repo, user.hub_id, product_id)?;

    let link = form
        .into_new_link(product.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(image_id) = link.image_id {
        ensure_image(repo, user.hub_id, image_id)?;
    }

    repo.add_product_image(&link).map_err(ServiceError::from)
}

fn find_product<R>(repo: &R, site_id: i32, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id, site_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

fn ensure_references<R>(
    repo: &R,
    site_id: i32,
    image_id: Option<i32>,
    collection_id: Option<i32>,
) -> ServiceResult<()>
where
    R: CollectionReader + ImageReader + ?Sized,
{
    if let Some(image_id) = image_id {
        ensure_image(repo, site_id, image_id)?;
    }

    if let Some(collection_id) = collection_id {
        let found = repo
            .get_collection_by_id(collection_id, site_id)
            .map_err(ServiceError::from)?;
        if found.is_none() {
            return Err(ServiceError::Form(format!(
                "collection {collection_id} does not exist"
            )));
        }
    }

    Ok(())
}

pub(crate) fn ensure_image<R>(repo: &R, site_id: i32, image_id: i32) -> ServiceResult<()>
where
    R: ImageReader + ?Sized,
{
    match repo
        .get_image_by_id(image_id, site_id)
        .map_err(ServiceError::from)?
    {
        Some(_) => Ok(()),
        None => Err(ServiceError::Form(format!("image {image_id} does not exist"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::RepositoryResult;

    use crate::domain::collection::CollectionListQuery;
    use crate::domain::custom_field::NewCustomField;
    use crate::domain::image::{CollectionImage, NewImageLink};
    use crate::domain::page::{Page, PageListQuery, PageType};
    use crate::domain::product::{NewProduct, ProductListQuery, UpdateProduct};
    use crate::repository::mock::{
        MockCollectionReader, MockImageReader, MockPageReader, MockProductReader,
        MockProductWriter,
    };

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    struct MockProductRepo {
        pages: MockPageReader,
        reader: MockProductReader,
        writer: MockProductWriter,
        collections: MockCollectionReader,
        images: MockImageReader,
    }

    impl MockProductRepo {
        fn new() -> Self {
            Self {
                pages: MockPageReader::new(),
                reader: MockProductReader::new(),
                writer: MockProductWriter::new(),
                collections: MockCollectionReader::new(),
                images: MockImageReader::new(),
            }
        }
    }

    impl PageReader for MockProductRepo {
        fn get_page_by_id(&self, page_id: i32, site_id: i32) -> RepositoryResult<Option<Page>> {
            self.pages.get_page_by_id(page_id, site_id)
        }

        fn get_page_by_url_path(
            &self,
            site_id: i32,
            url_path: &str,
        ) -> RepositoryResult<Option<Page>> {
            self.pages.get_page_by_url_path(site_id, url_path)
        }

        fn list_pages(&self, query: PageListQuery) -> RepositoryResult<Vec<Page>> {
            self.pages.list_pages(query)
        }

        fn first_descendant(&self, page: &Page) -> RepositoryResult<Option<Page>> {
            self.pages.first_descendant(page)
        }

        fn first_sibling(&self, page: &Page) -> RepositoryResult<Option<Page>> {
            self.pages.first_sibling(page)
        }
    }

    impl ProductReader for MockProductRepo {
        fn get_product_by_id(
            &self,
            product_id: i32,
            site_id: i32,
        ) -> RepositoryResult<Option<Product>> {
            self.reader.get_product_by_id(product_id, site_id)
        }

        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
            self.reader.list_products(query)
        }

        fn list_product_custom_fields(
            &self,
            product_id: i32,
        ) -> RepositoryResult<Vec<CustomField>> {
            self.reader.list_product_custom_fields(product_id)
        }

        fn list_product_images(&self, product_ids: &[i32]) -> RepositoryResult<Vec<ProductImage>> {
            self.reader.list_product_images(product_ids)
        }
    }

    impl ProductWriter for MockProductRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.writer.create_product(new_product)
        }

        fn update_product(
            &self,
            product_id: i32,
            site_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product> {
            self.writer.update_product(product_id, site_id, updates)
        }

        fn add_product_custom_field(
            &self,
            field: &NewCustomField,
        ) -> RepositoryResult<CustomField> {
            self.writer.add_product_custom_field(field)
        }

        fn add_product_image(&self, link: &NewImageLink) -> RepositoryResult<ProductImage> {
            self.writer.add_product_image(link)
        }
    }

    impl CollectionReader for MockProductRepo {
        fn get_collection_by_id(
            &self,
            collection_id: i32,
            site_id: i32,
        ) -> RepositoryResult<Option<ProductCollection>> {
            self.collections.get_collection_by_id(collection_id, site_id)
        }

        fn get_collection_by_name(
            &self,
            name: &str,
        ) -> RepositoryResult<Option<ProductCollection>> {
            self.collections.get_collection_by_name(name)
        }

        fn list_collections(
            &self,
            query: CollectionListQuery,
        ) -> RepositoryResult<Vec<ProductCollection>> {
            self.collections.list_collections(query)
        }

        fn list_collection_custom_fields(
            &self,
            collection_id: i32,
        ) -> RepositoryResult<Vec<CustomField>> {
            self.collections.list_collection_custom_fields(collection_id)
        }

        fn list_collection_images(
            &self,
            collection_id: i32,
        ) -> RepositoryResult<Vec<CollectionImage>> {
            self.collections.list_collection_images(collection_id)
        }
    }

    impl ImageReader for MockProductRepo {
        fn get_image_by_id(&self, image_id: i32, site_id: i32) -> RepositoryResult<Option<Image>> {
            self.images.get_image_by_id(image_id, site_id)
        }

        fn list_images(&self, site_id: i32) -> RepositoryResult<Vec<Image>> {
            self.images.list_images(site_id)
        }
    }

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

    fn shop_page() -> Page {
        Page {
            id: 2,
            site_id: 9,
            parent_id: Some(1),
            path: "00010001".to_string(),
            depth: 2,
            title: "Shop".to_string(),
            slug: "shop".to_string(),
            url_path: "/shop/".to_string(),
            page_type: PageType::Shop,
            live: true,
            catalog_root_id: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_product(id: i32) -> Product {
        Product {
            id,
            site_id: 9,
            parent_id: Some(2),
            title: "Mug".to_string(),
            slug: "mug".to_string(),
            url_path: "/shop/mug/".to_string(),
            live: false,
            sku: "MUG-1".to_string(),
            short_description: None,
            price_cents: 1250,
            image_id: None,
            image: None,
            collection_id: None,
        }
    }

    fn add_form(collection_id: Option<&str>) -> AddProductForm {
        AddProductForm {
            parent_id: 2,
            title: "Mug".to_string(),
            slug: None,
            sku: "MUG-1".to_string(),
            price: "12.50".to_string(),
            short_description: None,
            image_id: None,
            collection_id: collection_id.map(str::to_string),
            live: false,
        }
    }

    #[test]
    fn create_product_requires_role() {
        let repo = MockProductRepo::new();
        let user = user_with_roles(&["viewer"]);

        let result = create_product(&repo, &user, add_form(None));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_product_persists_payload() {
        let mut repo = MockProductRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.pages
            .expect_get_page_by_id()
            .returning(|_, _| Ok(Some(shop_page())));
        repo.pages
            .expect_get_page_by_url_path()
            .withf(|_, url_path| url_path == "/shop/mug/")
            .returning(|_, _| Ok(None));
        repo.writer
            .expect_create_product()
            .times(1)
            .withf(|new_product| {
                new_product.page.site_id == 9
                    && new_product.page.parent_id == Some(2)
                    && new_product.price_cents == 1250
            })
            .returning(|_| Ok(sample_product(3)));

        let product = create_product(&repo, &user, add_form(None)).expect("expected product");

        assert_eq!(product.id, 3);
    }

    #[test]
    fn create_product_rejects_unknown_collection() {
        let mut repo = MockProductRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.collections
            .expect_get_collection_by_id()
            .withf(|collection_id, site_id| *collection_id == 44 && *site_id == 9)
            .returning(|_, _| Ok(None));
        repo.writer.expect_create_product().never();

        let result = create_product(&repo, &user, add_form(Some("44")));

        assert!(matches!(result, Err(ServiceError::Form(message)) if message.contains("44")));
    }

    #[test]
    fn add_product_custom_field_targets_existing_product() {
        let mut repo = MockProductRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.reader
            .expect_get_product_by_id()
            .returning(|product_id, _| Ok(Some(sample_product(product_id))));
        repo.writer
            .expect_add_product_custom_field()
            .times(1)
            .withf(|field| field.owner_id == 3 && field.options.as_deref() == Some("S|M"))
            .returning(|field| {
                Ok(CustomField {
                    id: 1,
                    owner_id: field.owner_id,
                    sort_order: 0,
                    name: field.name.clone(),
                    options: field.options.clone(),
                })
            });

        let form = AddCustomFieldForm {
            name: "Size".to_string(),
            options: Some("S|M".to_string()),
        };
        let field = add_product_custom_field(&repo, &user, 3, form).expect("expected field");

        assert_eq!(field.sort_order, 0);
    }

    #[test]
    fn add_product_image_rejects_foreign_image() {
        let mut repo = MockProductRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.reader
            .expect_get_product_by_id()
            .returning(|product_id, _| Ok(Some(sample_product(product_id))));
        repo.images
            .expect_get_image_by_id()
            .returning(|_, _| Ok(None));
        repo.writer.expect_add_product_image().never();

        let result = add_product_image(&repo, &user, 3, AddImageLinkForm { image_id: 8 });

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn modify_product_for_missing_product_is_not_found() {
        let mut repo = MockProductRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.writer.expect_update_product().returning(|_, _, _| {
            Err(pushkind_common::repository::errors::RepositoryError::NotFound)
        });

        let form = EditProductForm {
            sku: "MUG-1".to_string(),
            price: "1".to_string(),
            short_description: None,
            image_id: None,
            collection_id: None,
        };
        let result = modify_product(&repo, &user, 404, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
