//! Catalog lookup for container pages and product image association.

use std::collections::HashMap;

use pushkind_common::repository::errors::RepositoryError;
use serde::Serialize;
use thiserror::Error;

use crate::domain::collection::{CollectionListQuery, ProductCollection};
use crate::domain::image::{Image, ProductImage};
use crate::domain::page::{Page, PageType};
use crate::domain::product::{Product, ProductListQuery};
use crate::repository::{CollectionReader, PageReader, ProductReader};
use crate::services::ServiceError;

/// Errors raised while resolving a container page's catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The container page has nothing to resolve its catalog from. This is a
    /// site configuration problem rather than a visitor error.
    #[error("page {page_id} has no {relation} to resolve the catalog from")]
    MissingCatalogRoot {
        page_id: i32,
        relation: &'static str,
    },
    /// Any other failure while loading the data.
    #[error("{0}")]
    Service(ServiceError),
}

impl From<ServiceError> for CatalogError {
    fn from(value: ServiceError) -> Self {
        CatalogError::Service(value)
    }
}

impl From<RepositoryError> for CatalogError {
    fn from(value: RepositoryError) -> Self {
        CatalogError::Service(ServiceError::from(value))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Positional rule used to find a container's catalog root when it has no
/// explicit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRule {
    /// First descendant of the container in tree order (home pages).
    FirstDescendant,
    /// First sibling of the container in tree order, itself included (shop pages).
    FirstSibling,
}

impl CatalogRule {
    /// Rule applied by a page type, if it lists a catalog at all.
    pub fn for_page_type(page_type: PageType) -> Option<Self> {
        match page_type {
            PageType::Home => Some(CatalogRule::FirstDescendant),
            PageType::Shop => Some(CatalogRule::FirstSibling),
            _ => None,
        }
    }

    fn relation(&self) -> &'static str {
        match self {
            CatalogRule::FirstDescendant => "descendant page",
            CatalogRule::FirstSibling => "sibling page",
        }
    }
}

/// Live catalog found beneath a container page.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Page whose children form the catalog.
    pub root: Page,
    /// Live product pages in tree order.
    pub products: Vec<Product>,
    /// Live collection pages in tree order.
    pub collections: Vec<ProductCollection>,
}

/// Finds the page whose children make up `container`'s catalog.
///
/// An explicit `catalog_root_id` always wins; the positional `rule` is only
/// consulted for pages that have none.
pub fn resolve_catalog_root<R>(repo: &R, container: &Page, rule: CatalogRule) -> CatalogResult<Page>
where
    R: PageReader + ?Sized,
{
    if let Some(root_id) = container.catalog_root_id {
        return repo
            .get_page_by_id(root_id, container.site_id)?
            .ok_or(CatalogError::MissingCatalogRoot {
                page_id: container.id,
                relation: "catalog root",
            });
    }

    log::debug!(
        "Page {} has no catalog root, falling back to its {}",
        container.id,
        rule.relation()
    );

    let found = match rule {
        CatalogRule::FirstDescendant => repo.first_descendant(container)?,
        CatalogRule::FirstSibling => repo.first_sibling(container)?,
    };

    found.ok_or(CatalogError::MissingCatalogRoot {
        page_id: container.id,
        relation: rule.relation(),
    })
}

/// Resolves the catalog root of `container` and loads its live products and
/// collections.
pub fn lookup_catalog<R>(repo: &R, container: &Page, rule: CatalogRule) -> CatalogResult<Catalog>
where
    R: PageReader + ProductReader + CollectionReader + ?Sized,
{
    let root = resolve_catalog_root(repo, container, rule)?;

    let products =
        repo.list_products(ProductListQuery::new(root.site_id).child_of(root.id).live())?;
    let collections =
        repo.list_collections(CollectionListQuery::new(root.site_id).child_of(root.id).live())?;

    Ok(Catalog {
        root,
        products,
        collections,
    })
}

/// Product together with the images linked to it.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub product: Product,
    /// Price formatted with two decimal places.
    pub price: String,
    /// Listing image: the product's own image, else its last linked image.
    pub image: Option<Image>,
    /// Linked images in record order.
    pub images: Vec<ProductImage>,
}

/// Indexes image links by product in a single pass, keeping record order
/// within each product.
pub fn group_images_by_product(images: Vec<ProductImage>) -> HashMap<i32, Vec<ProductImage>> {
    let mut grouped: HashMap<i32, Vec<ProductImage>> = HashMap::new();
    for image in images {
        grouped.entry(image.product_id).or_default().push(image);
    }
    grouped
}

/// Attaches to each product the links that reference it.
///
/// Products without links get an empty list. Links to products that are not
/// part of `products` are ignored.
pub fn associate_product_images(
    products: Vec<Product>,
    images: Vec<ProductImage>,
) -> Vec<ProductCard> {
    let mut grouped = group_images_by_product(images);

    products
        .into_iter()
        .map(|product| {
            let images = grouped.remove(&product.id).unwrap_or_default();
            let image = product
                .image
                .clone()
                .or_else(|| images.iter().rev().find_map(|link| link.image.clone()));
            ProductCard {
                price: product.price().to_string(),
                product,
                image,
                images,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::RepositoryResult;

    use crate::domain::custom_field::CustomField;
    use crate::domain::image::CollectionImage;
    use crate::repository::mock::{MockCollectionReader, MockPageReader, MockProductReader};

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_page(id: i32, parent_id: Option<i32>, path: &str, page_type: PageType) -> Page {
        Page {
            id,
            site_id: 1,
            parent_id,
            path: path.to_string(),
            depth: (path.len() / 4) as i32,
            title: format!("Page {id}"),
            slug: format!("page-{id}"),
            url_path: format!("/page-{id}/"),
            page_type,
            live: true,
            catalog_root_id: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_product(id: i32, parent_id: i32) -> Product {
        Product {
            id,
            site_id: 1,
            parent_id: Some(parent_id),
            title: format!("Product {id}"),
            slug: format!("product-{id}"),
            url_path: format!("/shop/product-{id}/"),
            live: true,
            sku: format!("SKU-{id}"),
            short_description: None,
            price_cents: 1999,
            image_id: None,
            image: None,
            collection_id: None,
        }
    }

    fn sample_image(id: i32, title: &str) -> Image {
        Image {
            id,
            site_id: 1,
            title: title.to_string(),
            url: format!("/media/{title}.jpg"),
            created_at: fixed_datetime(),
        }
    }

    fn link(id: i32, product_id: i32, image: Image) -> ProductImage {
        ProductImage {
            id,
            product_id,
            sort_order: id,
            image: Some(image),
        }
    }

    struct MockCatalogRepo {
        pages: MockPageReader,
        products: MockProductReader,
        collections: MockCollectionReader,
    }

    impl MockCatalogRepo {
        fn new() -> Self {
            Self {
                pages: MockPageReader::new(),
                products: MockProductReader::new(),
                collections: MockCollectionReader::new(),
            }
        }
    }

    impl PageReader for MockCatalogRepo {
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

        fn list_pages(
            &self,
            query: crate::domain::page::PageListQuery,
        ) -> RepositoryResult<Vec<Page>> {
            self.pages.list_pages(query)
        }

        fn first_descendant(&self, page: &Page) -> RepositoryResult<Option<Page>> {
            self.pages.first_descendant(page)
        }

        fn first_sibling(&self, page: &Page) -> RepositoryResult<Option<Page>> {
            self.pages.first_sibling(page)
        }
    }

    impl ProductReader for MockCatalogRepo {
        fn get_product_by_id(
            &self,
            product_id: i32,
            site_id: i32,
        ) -> RepositoryResult<Option<Product>> {
            self.products.get_product_by_id(product_id, site_id)
        }

        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
            self.products.list_products(query)
        }

        fn list_product_custom_fields(
            &self,
            product_id: i32,
        ) -> RepositoryResult<Vec<CustomField>> {
            self.products.list_product_custom_fields(product_id)
        }

        fn list_product_images(&self, product_ids: &[i32]) -> RepositoryResult<Vec<ProductImage>> {
            self.products.list_product_images(product_ids)
        }
    }

    impl CollectionReader for MockCatalogRepo {
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

    #[test]
    fn home_rule_lists_live_children_of_first_descendant() {
        let mut repo = MockCatalogRepo::new();
        let home = sample_page(1, None, "0001", PageType::Home);
        let shop = sample_page(2, Some(1), "00010001", PageType::Shop);
        let shop_for_descendant = shop.clone();

        repo.pages
            .expect_first_descendant()
            .times(1)
            .withf(|page| page.id == 1)
            .returning(move |_| Ok(Some(shop_for_descendant.clone())));
        repo.products
            .expect_list_products()
            .times(1)
            .withf(|query| {
                assert_eq!(query.parent_id, Some(2));
                assert!(query.live_only);
                true
            })
            .returning(|_| Ok(vec![sample_product(3, 2), sample_product(4, 2)]));
        repo.collections
            .expect_list_collections()
            .times(1)
            .withf(|query| query.parent_id == Some(2) && query.live_only)
            .returning(|_| Ok(Vec::new()));

        let catalog = lookup_catalog(&repo, &home, CatalogRule::FirstDescendant)
            .expect("expected catalog");

        assert_eq!(catalog.root, shop);
        let ids: Vec<i32> = catalog.products.iter().map(|product| product.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert!(catalog.collections.is_empty());
    }

    #[test]
    fn home_rule_without_descendants_fails() {
        let mut repo = MockCatalogRepo::new();
        let home = sample_page(1, None, "0001", PageType::Home);

        repo.pages
            .expect_first_descendant()
            .times(1)
            .returning(|_| Ok(None));
        repo.products.expect_list_products().never();

        let result = lookup_catalog(&repo, &home, CatalogRule::FirstDescendant);

        assert!(matches!(
            result,
            Err(CatalogError::MissingCatalogRoot { page_id: 1, .. })
        ));
    }

    #[test]
    fn shop_rule_uses_first_sibling() {
        let mut repo = MockCatalogRepo::new();
        let shop = sample_page(2, Some(1), "00010001", PageType::Shop);
        let shop_for_sibling = shop.clone();

        repo.pages
            .expect_first_sibling()
            .times(1)
            .returning(move |_| Ok(Some(shop_for_sibling.clone())));

        let root = resolve_catalog_root(&repo, &shop, CatalogRule::FirstSibling)
            .expect("expected root");

        assert_eq!(root.id, 2);
    }

    #[test]
    fn explicit_catalog_root_overrides_positional_rule() {
        let mut repo = MockCatalogRepo::new();
        let mut home = sample_page(1, None, "0001", PageType::Home);
        home.catalog_root_id = Some(9);
        let target = sample_page(9, Some(1), "00010002", PageType::Generic);

        repo.pages.expect_first_descendant().never();
        repo.pages
            .expect_get_page_by_id()
            .times(1)
            .withf(|page_id, site_id| *page_id == 9 && *site_id == 1)
            .returning(move |_, _| Ok(Some(target.clone())));

        let root = resolve_catalog_root(&repo, &home, CatalogRule::FirstDescendant)
            .expect("expected root");

        assert_eq!(root.id, 9);
    }

    #[test]
    fn dangling_catalog_root_is_a_lookup_miss() {
        let mut repo = MockCatalogRepo::new();
        let mut shop = sample_page(2, Some(1), "00010001", PageType::Shop);
        shop.catalog_root_id = Some(42);

        repo.pages
            .expect_get_page_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = resolve_catalog_root(&repo, &shop, CatalogRule::FirstSibling);

        assert!(matches!(
            result,
            Err(CatalogError::MissingCatalogRoot {
                page_id: 2,
                relation: "catalog root"
            })
        ));
    }

    #[test]
    fn associate_product_images_groups_by_product_in_record_order() {
        let products = vec![sample_product(1, 10), sample_product(2, 10)];
        let images = vec![
            link(1, 1, sample_image(100, "imgA")),
            link(2, 1, sample_image(101, "imgB")),
            link(3, 2, sample_image(102, "imgC")),
        ];

        let cards = associate_product_images(products, images);

        assert_eq!(cards.len(), 2);
        let first: Vec<i32> = cards[0].images.iter().map(|link| link.id).collect();
        let second: Vec<i32> = cards[1].images.iter().map(|link| link.id).collect();
        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![3]);
        assert_eq!(
            cards[0].image.as_ref().map(|image| image.title.as_str()),
            Some("imgB")
        );
        assert_eq!(cards[0].price, "19.99");
    }

    #[test]
    fn associate_product_images_leaves_unmatched_products_empty() {
        let products = vec![sample_product(1, 10)];
        let images = vec![link(1, 99, sample_image(100, "stray"))];

        let cards = associate_product_images(products, images);

        assert!(cards[0].images.is_empty());
        assert!(cards[0].image.is_none());
    }

    #[test]
    fn product_image_wins_over_linked_images() {
        let mut product = sample_product(1, 10);
        product.image_id = Some(200);
        product.image = Some(sample_image(200, "cover"));
        let images = vec![link(1, 1, sample_image(100, "detail"))];

        let cards = associate_product_images(vec![product], images);

        assert_eq!(
            cards[0].image.as_ref().map(|image| image.id),
            Some(200)
        );
        assert_eq!(cards[0].images.len(), 1);
    }
}
