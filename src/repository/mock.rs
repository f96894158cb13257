use mockall::mock;

use super::{
    CollectionReader, CollectionWriter, ImageReader, ImageWriter, PageReader, PageWriter,
    ProductReader, ProductWriter, SettingsReader, SettingsWriter,
};
use crate::domain::{
    collection::{CollectionListQuery, NewProductCollection, ProductCollection},
    custom_field::{CustomField, NewCustomField},
    image::{CollectionImage, Image, NewImage, NewImageLink, ProductImage},
    page::{NewPage, Page, PageListQuery},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    settings::{SaveSnipcartSettings, SnipcartSettings},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub PageReader {}

    impl PageReader for PageReader {
        fn get_page_by_id(&self, page_id: i32, site_id: i32) -> RepositoryResult<Option<Page>>;
        fn get_page_by_url_path(&self, site_id: i32, url_path: &str) -> RepositoryResult<Option<Page>>;
        fn list_pages(&self, query: PageListQuery) -> RepositoryResult<Vec<Page>>;
        fn first_descendant(&self, page: &Page) -> RepositoryResult<Option<Page>>;
        fn first_sibling(&self, page: &Page) -> RepositoryResult<Option<Page>>;
    }
}

mock! {
    pub PageWriter {}

    impl PageWriter for PageWriter {
        fn create_page(&self, new_page: &NewPage) -> RepositoryResult<Page>;
        fn set_page_live(&self, page_id: i32, site_id: i32, live: bool) -> RepositoryResult<Page>;
        fn set_catalog_root(&self, page_id: i32, site_id: i32, catalog_root_id: Option<i32>) -> RepositoryResult<Page>;
        fn delete_page(&self, page_id: i32, site_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, product_id: i32, site_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
        fn list_product_custom_fields(&self, product_id: i32) -> RepositoryResult<Vec<CustomField>>;
        fn list_product_images(&self, product_ids: &[i32]) -> RepositoryResult<Vec<ProductImage>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, site_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn add_product_custom_field(&self, field: &NewCustomField) -> RepositoryResult<CustomField>;
        fn add_product_image(&self, link: &NewImageLink) -> RepositoryResult<ProductImage>;
    }
}

mock! {
    pub CollectionReader {}

    impl CollectionReader for CollectionReader {
        fn get_collection_by_id(&self, collection_id: i32, site_id: i32) -> RepositoryResult<Option<ProductCollection>>;
        fn get_collection_by_name(&self, name: &str) -> RepositoryResult<Option<ProductCollection>>;
        fn list_collections(&self, query: CollectionListQuery) -> RepositoryResult<Vec<ProductCollection>>;
        fn list_collection_custom_fields(&self, collection_id: i32) -> RepositoryResult<Vec<CustomField>>;
        fn list_collection_images(&self, collection_id: i32) -> RepositoryResult<Vec<CollectionImage>>;
    }
}

mock! {
    pub CollectionWriter {}

    impl CollectionWriter for CollectionWriter {
        fn create_collection(&self, new_collection: &NewProductCollection) -> RepositoryResult<ProductCollection>;
        fn add_collection_custom_field(&self, field: &NewCustomField) -> RepositoryResult<CustomField>;
        fn add_collection_image(&self, link: &NewImageLink) -> RepositoryResult<CollectionImage>;
    }
}

mock! {
    pub ImageReader {}

    impl ImageReader for ImageReader {
        fn get_image_by_id(&self, image_id: i32, site_id: i32) -> RepositoryResult<Option<Image>>;
        fn list_images(&self, site_id: i32) -> RepositoryResult<Vec<Image>>;
    }
}

mock! {
    pub ImageWriter {}

    impl ImageWriter for ImageWriter {
        fn create_image(&self, new_image: &NewImage) -> RepositoryResult<Image>;
        fn delete_image(&self, image_id: i32, site_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub SettingsReader {}

    impl SettingsReader for SettingsReader {
        fn get_snipcart_settings(&self, site_id: i32) -> RepositoryResult<Option<SnipcartSettings>>;
    }
}

mock! {
    pub SettingsWriter {}

    impl SettingsWriter for SettingsWriter {
        fn save_snipcart_settings(&self, settings: &SaveSnipcartSettings) -> RepositoryResult<SnipcartSettings>;
    }
}
