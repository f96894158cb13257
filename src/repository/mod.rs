use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    collection::{CollectionListQuery, NewProductCollection, ProductCollection},
    custom_field::{CustomField, NewCustomField},
    image::{CollectionImage, Image, NewImage, NewImageLink, ProductImage},
    page::{NewPage, Page, PageListQuery},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    settings::{SaveSnipcartSettings, SnipcartSettings},
};

pub mod collection;
pub mod image;
pub mod page;
pub mod product;
pub mod settings;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only queries over a site's page tree.
pub trait PageReader {
    fn get_page_by_id(&self, page_id: i32, site_id: i32) -> RepositoryResult<Option<Page>>;
    fn get_page_by_url_path(&self, site_id: i32, url_path: &str)
    -> RepositoryResult<Option<Page>>;
    /// Pages in tree order.
    fn list_pages(&self, query: PageListQuery) -> RepositoryResult<Vec<Page>>;
    /// First page below `page` in tree order.
    fn first_descendant(&self, page: &Page) -> RepositoryResult<Option<Page>>;
    /// First child of `page`'s parent in tree order, `page` itself included.
    fn first_sibling(&self, page: &Page) -> RepositoryResult<Option<Page>>;
}

/// Structural changes to a site's page tree.
pub trait PageWriter {
    fn create_page(&self, new_page: &NewPage) -> RepositoryResult<Page>;
    fn set_page_live(&self, page_id: i32, site_id: i32, live: bool) -> RepositoryResult<Page>;
    fn set_catalog_root(
        &self,
        page_id: i32,
        site_id: i32,
        catalog_root_id: Option<i32>,
    ) -> RepositoryResult<Page>;
    /// Removes the page with its whole subtree and everything they own.
    fn delete_page(&self, page_id: i32, site_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over product pages.
pub trait ProductReader {
    fn get_product_by_id(&self, product_id: i32, site_id: i32)
    -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    fn list_product_custom_fields(&self, product_id: i32) -> RepositoryResult<Vec<CustomField>>;
    /// Image links of the given products in record order.
    fn list_product_images(&self, product_ids: &[i32]) -> RepositoryResult<Vec<ProductImage>>;
}

/// Write operations over product pages.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        site_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn add_product_custom_field(&self, field: &NewCustomField) -> RepositoryResult<CustomField>;
    fn add_product_image(&self, link: &NewImageLink) -> RepositoryResult<ProductImage>;
}

/// Read-only operations over product collection pages.
pub trait CollectionReader {
    fn get_collection_by_id(
        &self,
        collection_id: i32,
        site_id: i32,
    ) -> RepositoryResult<Option<ProductCollection>>;
    fn get_collection_by_name(&self, name: &str) -> RepositoryResult<Option<ProductCollection>>;
    fn list_collections(
        &self,
        query: CollectionListQuery,
    ) -> RepositoryResult<Vec<ProductCollection>>;
    fn list_collection_custom_fields(
        &self,
        collection_id: i32,
    ) -> RepositoryResult<Vec<CustomField>>;
    fn list_collection_images(&self, collection_id: i32) -> RepositoryResult<Vec<CollectionImage>>;
}

/// Write operations over product collection pages.
pub trait CollectionWriter {
    fn create_collection(
        &self,
        new_collection: &NewProductCollection,
    ) -> RepositoryResult<ProductCollection>;
    fn add_collection_custom_field(&self, field: &NewCustomField)
    -> RepositoryResult<CustomField>;
    fn add_collection_image(&self, link: &NewImageLink) -> RepositoryResult<CollectionImage>;
}

/// Read-only operations over image assets.
pub trait ImageReader {
    fn get_image_by_id(&self, image_id: i32, site_id: i32) -> RepositoryResult<Option<Image>>;
    fn list_images(&self, site_id: i32) -> RepositoryResult<Vec<Image>>;
}

/// Write operations over image assets.
pub trait ImageWriter {
    fn create_image(&self, new_image: &NewImage) -> RepositoryResult<Image>;
    /// Deletes the asset; links pointing at it are kept with an empty image.
    fn delete_image(&self, image_id: i32, site_id: i32) -> RepositoryResult<()>;
}

/// Read access to per-site settings.
pub trait SettingsReader {
    fn get_snipcart_settings(&self, site_id: i32) -> RepositoryResult<Option<SnipcartSettings>>;
}

/// Write access to per-site settings.
pub trait SettingsWriter {
    fn save_snipcart_settings(
        &self,
        settings: &SaveSnipcartSettings,
    ) -> RepositoryResult<SnipcartSettings>;
}
