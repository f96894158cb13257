use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::custom_field::{CustomField as DomainCustomField, NewCustomField},
    domain::image::{NewImageLink, ProductImage as DomainProductImage},
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::custom_field::{
        NewProductCustomField as DbNewProductCustomField,
        ProductCustomField as DbProductCustomField,
    },
    models::image::{
        Image as DbImage, NewProductImage as DbNewProductImage, ProductImage as DbProductImage,
    },
    models::page::Page as DbPage,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::page::insert_page,
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        product_id: i32,
        site_id: i32,
    ) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = load_product(&mut conn, product_id, site_id)?;
        Ok(product)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::{images, pages, products};

        let mut conn = self.conn()?;

        let mut items = products::table
            .inner_join(pages::table)
            .left_join(images::table)
            .select((
                DbProduct::as_select(),
                DbPage::as_select(),
                Option::<DbImage>::as_select(),
            ))
            .filter(pages::site_id.eq(query.site_id))
            .into_boxed::<Sqlite>();

        if let Some(parent_id) = query.parent_id {
            items = items.filter(pages::parent_id.eq(Some(parent_id)));
        }

        if let Some(collection_id) = query.collection_id {
            items = items.filter(products::collection_id.eq(Some(collection_id)));
        }

        if query.live_only {
            items = items.filter(pages::live.eq(true));
        }

        let rows = items
            .order(pages::path.asc())
            .load::<(DbProduct, DbPage, Option<DbImage>)>(&mut conn)?;

        Ok(rows.into_iter().map(DomainProduct::from).collect())
    }

    fn list_product_custom_fields(
        &self,
        product_id: i32,
    ) -> RepositoryResult<Vec<DomainCustomField>> {
        use crate::schema::product_custom_fields;

        let mut conn = self.conn()?;

        let fields = product_custom_fields::table
            .filter(product_custom_fields::product_id.eq(product_id))
            .order((
                product_custom_fields::sort_order.asc(),
                product_custom_fields::id.asc(),
            ))
            .load::<DbProductCustomField>(&mut conn)?;

        Ok(fields.into_iter().map(DomainCustomField::from).collect())
    }

    fn list_product_images(
        &self,
        product_ids: &[i32],
    ) -> RepositoryResult<Vec<DomainProductImage>> {
        use crate::schema::{images, product_images};

        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;

        let rows = product_images::table
            .left_join(images::table)
            .filter(product_images::product_id.eq_any(product_ids))
            .order((product_images::sort_order.asc(), product_images::id.asc()))
            .select((DbProductImage::as_select(), Option::<DbImage>::as_select()))
            .load::<(DbProductImage, Option<DbImage>)>(&mut conn)?;

        Ok(rows.into_iter().map(DomainProductImage::from).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let page = insert_page(conn, &new_product.page)?;

            let insertable = DbNewProduct::from_domain(page.id, new_product);
            diesel::insert_into(products::table)
                .values(&insertable)
                .execute(conn)?;

            load_product(conn, page.id, page.site_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        site_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{pages, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let page = diesel::update(
                pages::table
                    .filter(pages::id.eq(product_id))
                    .filter(pages::site_id.eq(site_id)),
            )
            .set(pages::updated_at.eq(updates.updated_at))
            .get_result::<DbPage>(conn)?;

            let db_updates = DbUpdateProduct::from(updates);
            diesel::update(products::table.filter(products::page_id.eq(page.id)))
                .set(&db_updates)
                .execute(conn)?;

            load_product(conn, page.id, site_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn add_product_custom_field(
        &self,
        field: &NewCustomField,
    ) -> RepositoryResult<DomainCustomField> {
        use crate::schema::product_custom_fields;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCustomField, RepositoryError, _>(|conn| {
            ensure_product(conn, field.owner_id)?;

            let last = product_custom_fields::table
                .filter(product_custom_fields::product_id.eq(field.owner_id))
                .select(diesel::dsl::max(product_custom_fields::sort_order))
                .first::<Option<i32>>(conn)?;

            let insertable = DbNewProductCustomField {
                product_id: field.owner_id,
                sort_order: last.map_or(0, |value| value + 1),
                name: field.name.as_str(),
                options: field.options.as_deref(),
            };

            let created = diesel::insert_into(product_custom_fields::table)
                .values(&insertable)
                .get_result::<DbProductCustomField>(conn)?;

            Ok(created.into())
        })
    }

    fn add_product_image(&self, link: &NewImageLink) -> RepositoryResult<DomainProductImage> {
        use crate::schema::{images, product_images};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProductImage, RepositoryError, _>(|conn| {
            ensure_product(conn, link.owner_id)?;

            let last = product_images::table
                .filter(product_images::product_id.eq(link.owner_id))
                .select(diesel::dsl::max(product_images::sort_order))
                .first::<Option<i32>>(conn)?;

            let insertable = DbNewProductImage {
                product_id: link.owner_id,
                sort_order: last.map_or(0, |value| value + 1),
                image_id: link.image_id,
            };

            let created = diesel::insert_into(product_images::table)
                .values(&insertable)
                .get_result::<DbProductImage>(conn)?;

            let image = match created.image_id {
                Some(image_id) => images::table
                    .filter(images::id.eq(image_id))
                    .first::<DbImage>(conn)
                    .optional()?,
                None => None,
            };

            Ok((created, image).into())
        })
    }
}

fn load_product(
    conn: &mut SqliteConnection,
    product_id: i32,
    site_id: i32,
) -> RepositoryResult<Option<DomainProduct>> {
    use crate::schema::{images, pages, products};

    let row = products::table
        .inner_join(pages::table)
        .left_join(images::table)
        .filter(products::page_id.eq(product_id))
        .filter(pages::site_id.eq(site_id))
        .select((
            DbProduct::as_select(),
            DbPage::as_select(),
            Option::<DbImage>::as_select(),
        ))
        .first::<(DbProduct, DbPage, Option<DbImage>)>(conn)
        .optional()?;

    Ok(row.map(DomainProduct::from))
}

fn ensure_product(conn: &mut SqliteConnection, product_id: i32) -> RepositoryResult<()> {
    use crate::schema::products;

    let found = products::table
        .filter(products::page_id.eq(product_id))
        .select(products::page_id)
        .first::<i32>(conn)
        .optional()?;

    match found {
        Some(_) => Ok(()),
        None => Err(RepositoryError::NotFound),
    }
}
