//! Public page rendering: resolves a request path to a live page and gathers
//! everything its template needs.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::collection::ProductCollection;
use crate::domain::custom_field::{CustomFieldView, into_views};
use crate::domain::image::{CollectionImage, ProductImage};
use crate::domain::page::{Page, PageType, ROOT_URL_PATH};
use crate::domain::product::{Product, ProductListQuery};
use crate::repository::{CollectionReader, PageReader, ProductReader, SettingsReader};
use crate::services::ServiceError;
use crate::services::catalog::{
    CatalogResult, CatalogRule, ProductCard, associate_product_images, lookup_catalog,
};

/// Per-request view of the site being rendered.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub site_id: i32,
    /// Checkout widget key; `None` until the site settings are saved.
    pub snipcart_api_key: Option<String>,
}

/// Reads the settings of `site_id` once for the current request.
pub fn load_site_context<R>(repo: &R, site_id: i32) -> CatalogResult<SiteContext>
where
    R: SettingsReader + ?Sized,
{
    let settings = repo.get_snipcart_settings(site_id)?;

    Ok(SiteContext {
        site_id,
        snipcart_api_key: settings.map(|settings| settings.api_key),
    })
}

/// Data gathered for a container page listing a catalog.
#[derive(Debug)]
pub struct CatalogPageData {
    pub page: Page,
    pub products: Vec<ProductCard>,
    pub collections: Vec<ProductCollection>,
}

/// Data gathered for a product page.
#[derive(Debug)]
pub struct ProductPageData {
    pub page: Page,
    pub product: Product,
    pub price: String,
    pub custom_fields: Vec<CustomFieldView>,
    pub product_images: Vec<ProductImage>,
    pub collection: Option<ProductCollection>,
}

/// Data gathered for a collection page.
#[derive(Debug)]
pub struct CollectionPageData {
    pub page: Page,
    pub collection: ProductCollection,
    pub custom_fields: Vec<CustomFieldView>,
    pub collection_images: Vec<CollectionImage>,
    pub products: Vec<ProductCard>,
}

/// Template data for one page, by page type.
#[derive(Debug)]
pub enum PageData {
    Home(CatalogPageData),
    Shop(CatalogPageData),
    Product(ProductPageData),
    Collection(CollectionPageData),
    Generic(Page),
}

impl PageData {
    pub fn page(&self) -> &Page {
        match self {
            PageData::Home(data) | PageData::Shop(data) => &data.page,
            PageData::Product(data) => &data.page,
            PageData::Collection(data) => &data.page,
            PageData::Generic(page) => page,
        }
    }

    /// Template rendering this page.
    pub fn template(&self) -> &'static str {
        match self {
            PageData::Home(_) => "pages/home.html",
            PageData::Shop(_) => "pages/shop.html",
            PageData::Product(_) => "pages/product.html",
            PageData::Collection(_) => "pages/collection.html",
            PageData::Generic(_) => "pages/page.html",
        }
    }
}

/// Normalizes a request path into the `/a/b/` form stored on pages.
pub fn normalize_url_path(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').filter(|part| !part.is_empty()).collect();
    if segments.is_empty() {
        return ROOT_URL_PATH.to_string();
    }
    format!("/{}/", segments.join("/"))
}

/// Loads the live page at `url_path` of the current site.
///
/// Unknown and unpublished pages are reported as `ServiceError::NotFound`.
pub fn load_page<R>(repo: &R, site: &SiteContext, url_path: &str) -> CatalogResult<PageData>
where
    R: PageReader + ProductReader + CollectionReader + ?Sized,
{
    let url_path = normalize_url_path(url_path);

    let page = match repo.get_page_by_url_path(site.site_id, &url_path)? {
        Some(page) if page.live => page,
        _ => return Err(ServiceError::NotFound.into()),
    };

    match page.page_type {
        PageType::Home => load_catalog_page(repo, page).map(PageData::Home),
        PageType::Shop => load_catalog_page(repo, page).map(PageData::Shop),
        PageType::Product => load_product_page(repo, page).map(PageData::Product),
        PageType::Collection => load_collection_page(repo, page).map(PageData::Collection),
        PageType::Generic => Ok(PageData::Generic(page)),
    }
}

/// Product as served to the checkout widget's JSON crawler, which validates
/// cart prices against it.
#[derive(Debug, Serialize)]
pub struct CheckoutProduct {
    /// SKU, used as the checkout item id.
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// URL the crawler fetched this record from.
    pub url: String,
}

/// Loads a live product of the current site for the checkout crawler.
pub fn load_checkout_product<R>(
    repo: &R,
    site: &SiteContext,
    product_id: i32,
) -> CatalogResult<CheckoutProduct>
where
    R: ProductReader + ?Sized,
{
    let product = match repo.get_product_by_id(product_id, site.site_id)? {
        Some(product) if product.live => product,
        _ => return Err(ServiceError::NotFound.into()),
    };

    Ok(CheckoutProduct {
        url: checkout_product_url(product.id),
        price: product.price(),
        id: product.sku,
        name: product.title,
    })
}

/// Crawler URL of a product, used as the checkout item url.
pub fn checkout_product_url(product_id: i32) -> String {
    format!("/api/v1/products/{product_id}")
}

fn load_catalog_page<R>(repo: &R, page: Page) -> CatalogResult<CatalogPageData>
where
    R: PageReader + ProductReader + CollectionReader + ?Sized,
{
    let rule = CatalogRule::for_page_type(page.page_type).unwrap_or(CatalogRule::FirstSibling);
    let catalog = lookup_catalog(repo, &page, rule)?;

    let products = product_cards(repo, catalog.products)?;

    Ok(CatalogPageData {
        page,
        products,
        collections: catalog.collections,
    })
}

fn load_product_page<R>(repo: &R, page: Page) -> CatalogResult<ProductPageData>
where
    R: ProductReader + CollectionReader + ?Sized,
{
    let product = repo
        .get_product_by_id(page.id, page.site_id)?
        .ok_or(ServiceError::NotFound)?;

    let custom_fields = into_views(repo.list_product_custom_fields(product.id)?);
    let product_images = repo.list_product_images(&[product.id])?;

    let collection = match product.collection_id {
        Some(collection_id) => repo
            .get_collection_by_id(collection_id, page.site_id)?
            .filter(|collection| collection.live),
        None => None,
    };

    Ok(ProductPageData {
        price: product.price().to_string(),
        page,
        product,
        custom_fields,
        product_images,
        collection,
    })
}

fn load_collection_page<R>(repo: &R, page: Page) -> CatalogResult<CollectionPageData>
where
    R: ProductReader + CollectionReader + ?Sized,
{
    let collection = repo
        .get_collection_by_id(page.id, page.site_id)?
        .ok_or(ServiceError::NotFound)?;

    let custom_fields = into_views(repo.list_collection_custom_fields(collection.id)?);
    let collection_images = repo.list_collection_images(collection.id)?;

    let members = repo.list_products(
        ProductListQuery::new(page.site_id)
            .in_collection(collection.id)
            .live(),
    )?;
    let products = product_cards(repo, members)?;

    Ok(CollectionPageData {
        page,
        collection,
        custom_fields,
        collection_images,
        products,
    })
}

fn product_cards<R>(repo: &R, products: Vec<Product>) -> CatalogResult<Vec<ProductCard>>
where
    R: ProductReader + ?Sized,
{
    let ids: Vec<i32> = products.iter().map(|product| product.id).collect();
    let images = repo.list_product_images(&ids)?;
    Ok(associate_product_images(products, images))
}
