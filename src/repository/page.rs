use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::page::{
    NewPage as DomainNewPage, Page as DomainPage, PageListQuery, ROOT_URL_PATH,
};
use crate::models::page::{NewPage as DbNewPage, Page as DbPage};
use crate::repository::{DieselRepository, PageReader, PageWriter};

/// Characters used per tree level in a page path.
const STEP_LEN: usize = 4;
/// Radix of a path step; digits then uppercase letters keep byte order numeric.
const PATH_BASE: u32 = 36;

impl PageReader for DieselRepository {
    fn get_page_by_id(&self, page_id: i32, site_id: i32) -> RepositoryResult<Option<DomainPage>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let page = pages::table
            .filter(pages::id.eq(page_id))
            .filter(pages::site_id.eq(site_id))
            .first::<DbPage>(&mut conn)
            .optional()?;

        Ok(page.map(DomainPage::from))
    }

    fn get_page_by_url_path(
        &self,
        site_id: i32,
        url_path: &str,
    ) -> RepositoryResult<Option<DomainPage>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let page = pages::table
            .filter(pages::site_id.eq(site_id))
            .filter(pages::url_path.eq(url_path))
            .first::<DbPage>(&mut conn)
            .optional()?;

        Ok(page.map(DomainPage::from))
    }

    fn list_pages(&self, query: PageListQuery) -> RepositoryResult<Vec<DomainPage>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let mut items = pages::table
            .filter(pages::site_id.eq(query.site_id))
            .into_boxed::<Sqlite>();

        if let Some(parent_id) = query.parent_id {
            items = items.filter(pages::parent_id.eq(Some(parent_id)));
        }

        if query.live_only {
            items = items.filter(pages::live.eq(true));
        }

        let pages = items.order(pages::path.asc()).load::<DbPage>(&mut conn)?;

        Ok(pages.into_iter().map(DomainPage::from).collect())
    }

    fn first_descendant(&self, page: &DomainPage) -> RepositoryResult<Option<DomainPage>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let descendant = pages::table
            .filter(pages::site_id.eq(page.site_id))
            .filter(pages::path.like(format!("{}%", page.path)))
            .filter(pages::depth.gt(page.depth))
            .order(pages::path.asc())
            .first::<DbPage>(&mut conn)
            .optional()?;

        Ok(descendant.map(DomainPage::from))
    }

    fn first_sibling(&self, page: &DomainPage) -> RepositoryResult<Option<DomainPage>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let mut siblings = pages::table
            .filter(pages::site_id.eq(page.site_id))
            .into_boxed::<Sqlite>();

        siblings = match page.parent_id {
            Some(parent_id) => siblings.filter(pages::parent_id.eq(Some(parent_id))),
            None => siblings.filter(pages::parent_id.is_null()),
        };

        let sibling = siblings
            .order(pages::path.asc())
            .first::<DbPage>(&mut conn)
            .optional()?;

        Ok(sibling.map(DomainPage::from))
    }
}

impl PageWriter for DieselRepository {
    fn create_page(&self, new_page: &DomainNewPage) -> RepositoryResult<DomainPage> {
        let mut conn = self.conn()?;

        let created = conn.transaction::<DbPage, RepositoryError, _>(|conn| {
            insert_page(conn, new_page)
        })?;

        Ok(created.into())
    }

    fn set_page_live(
        &self,
        page_id: i32,
        site_id: i32,
        live: bool,
    ) -> RepositoryResult<DomainPage> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let target = pages::table
            .filter(pages::id.eq(page_id))
            .filter(pages::site_id.eq(site_id));

        let updated = diesel::update(target)
            .set((
                pages::live.eq(live),
                pages::updated_at.eq(Local::now().naive_utc()),
            ))
            .get_result::<DbPage>(&mut conn)?;

        Ok(updated.into())
    }

    fn set_catalog_root(
        &self,
        page_id: i32,
        site_id: i32,
        catalog_root_id: Option<i32>,
    ) -> RepositoryResult<DomainPage> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        conn.transaction::<DomainPage, RepositoryError, _>(|conn| {
            if let Some(root_id) = catalog_root_id {
                ensure_page_in_site(conn, site_id, root_id)?;
            }

            let target = pages::table
                .filter(pages::id.eq(page_id))
                .filter(pages::site_id.eq(site_id));

            let updated = diesel::update(target)
                .set((
                    pages::catalog_root_id.eq(catalog_root_id),
                    pages::updated_at.eq(Local::now().naive_utc()),
                ))
                .get_result::<DbPage>(conn)?;

            Ok(updated.into())
        })
    }

    fn delete_page(&self, page_id: i32, site_id: i32) -> RepositoryResult<()> {
        use crate::schema::{
            collection_images, pages, product_collection_custom_fields, product_collections,
            product_custom_fields, product_images, products,
        };

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let page = pages::table
                .filter(pages::id.eq(page_id))
                .filter(pages::site_id.eq(site_id))
                .first::<DbPage>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let subtree = pages::table
                .filter(pages::site_id.eq(site_id))
                .filter(pages::path.like(format!("{}%", page.path)))
                .select(pages::id)
                .load::<i32>(conn)?;

            diesel::delete(
                product_custom_fields::table
                    .filter(product_custom_fields::product_id.eq_any(&subtree)),
            )
            .execute(conn)?;
            diesel::delete(
                product_images::table.filter(product_images::product_id.eq_any(&subtree)),
            )
            .execute(conn)?;

            // Products outside the subtree only lose their collection.
            diesel::update(products::table.filter(products::collection_id.eq_any(&subtree)))
                .set(products::collection_id.eq::<Option<i32>>(None))
                .execute(conn)?;
            diesel::delete(products::table.filter(products::page_id.eq_any(&subtree)))
                .execute(conn)?;

            diesel::delete(
                product_collection_custom_fields::table
                    .filter(product_collection_custom_fields::collection_id.eq_any(&subtree)),
            )
            .execute(conn)?;
            diesel::delete(
                collection_images::table.filter(collection_images::collection_id.eq_any(&subtree)),
            )
            .execute(conn)?;
            diesel::delete(
                product_collections::table.filter(product_collections::page_id.eq_any(&subtree)),
            )
            .execute(conn)?;

            diesel::update(pages::table.filter(pages::catalog_root_id.eq_any(&subtree)))
                .set(pages::catalog_root_id.eq::<Option<i32>>(None))
                .execute(conn)?;
            diesel::delete(pages::table.filter(pages::id.eq_any(&subtree))).execute(conn)?;

            Ok(())
        })
    }
}

/// Inserts a page at the end of its parent's children.
///
/// Must run inside a transaction so that the allocated path stays unique.
pub(crate) fn insert_page(
    conn: &mut SqliteConnection,
    new_page: &DomainNewPage,
) -> RepositoryResult<DbPage> {
    use crate::schema::pages;

    let parent = match new_page.parent_id {
        Some(parent_id) => Some(
            pages::table
                .filter(pages::id.eq(parent_id))
                .filter(pages::site_id.eq(new_page.site_id))
                .first::<DbPage>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?,
        ),
        None => None,
    };

    if let Some(root_id) = new_page.catalog_root_id {
        ensure_page_in_site(conn, new_page.site_id, root_id)?;
    }

    let path = next_child_path(conn, new_page.site_id, parent.as_ref())?;
    let (depth, url_path) = match &parent {
        Some(parent) => (
            parent.depth + 1,
            format!("{}{}/", parent.url_path, new_page.slug),
        ),
        None => (1, ROOT_URL_PATH.to_string()),
    };

    let insertable = DbNewPage::from_domain(new_page, path, depth, url_path);

    let created = diesel::insert_into(pages::table)
        .values(&insertable)
        .get_result::<DbPage>(conn)?;

    Ok(created)
}

fn next_child_path(
    conn: &mut SqliteConnection,
    site_id: i32,
    parent: Option<&DbPage>,
) -> RepositoryResult<String> {
    use crate::schema::pages;

    let mut siblings = pages::table
        .filter(pages::site_id.eq(site_id))
        .select(pages::path)
        .into_boxed::<Sqlite>();

    siblings = match parent {
        Some(parent) => siblings.filter(pages::parent_id.eq(Some(parent.id))),
        None => siblings.filter(pages::parent_id.is_null()),
    };

    let last = siblings
        .order(pages::path.desc())
        .first::<String>(conn)
        .optional()?;

    let next = match last {
        Some(path) => path
            .get(path.len().saturating_sub(STEP_LEN)..)
            .and_then(decode_step)
            .and_then(|step| step.checked_add(1))
            .ok_or_else(|| tree_error("malformed page path"))?,
        None => 1,
    };

    let step = encode_step(next).ok_or_else(|| tree_error("page has too many children"))?;
    let prefix = parent.map(|parent| parent.path.as_str()).unwrap_or_default();

    Ok(format!("{prefix}{step}"))
}

fn encode_step(value: u32) -> Option<String> {
    let mut digits = Vec::with_capacity(STEP_LEN);
    let mut rest = value;
    for _ in 0..STEP_LEN {
        let digit = char::from_digit(rest % PATH_BASE, PATH_BASE)?;
        digits.push(digit.to_ascii_uppercase());
        rest /= PATH_BASE;
    }

    if rest > 0 {
        return None;
    }

    Some(digits.into_iter().rev().collect())
}

fn decode_step(step: &str) -> Option<u32> {
    u32::from_str_radix(step, PATH_BASE).ok()
}

fn tree_error(message: &'static str) -> RepositoryError {
    RepositoryError::from(diesel::result::Error::QueryBuilderError(message.into()))
}

pub(crate) fn ensure_page_in_site(
    conn: &mut SqliteConnection,
    site_id: i32,
    page_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::pages;

    let exists = select(exists(
        pages::table
            .filter(pages::id.eq(page_id))
            .filter(pages::site_id.eq(site_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
