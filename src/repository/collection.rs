use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::collection::{
        CollectionListQuery, NewProductCollection as DomainNewProductCollection,
        ProductCollection as DomainProductCollection,
    },
    domain::custom_field::{CustomField as DomainCustomField, NewCustomField},
    domain::image::{CollectionImage as DomainCollectionImage, NewImageLink},
    models::collection::{
        NewProductCollection as DbNewProductCollection, ProductCollection as DbProductCollection,
    },
    models::custom_field::{
        CollectionCustomField as DbCollectionCustomField,
        NewCollectionCustomField as DbNewCollectionCustomField,
    },
    models::image::{
        CollectionImage as DbCollectionImage, Image as DbImage,
        NewCollectionImage as DbNewCollectionImage,
    },
    models::page::Page as DbPage,
    repository::page::insert_page,
    repository::{CollectionReader, CollectionWriter, DieselRepository},
};

impl CollectionReader for DieselRepository {
    fn get_collection_by_id(
        &self,
        collection_id: i32,
        site_id: i32,
    ) -> RepositoryResult<Option<DomainProductCollection>> {
        use crate::schema::{pages, product_collections};

        let mut conn = self.conn()?;

        let row = product_collections::table
            .inner_join(pages::table)
            .filter(product_collections::page_id.eq(collection_id))
            .filter(pages::site_id.eq(site_id))
            .select((DbProductCollection::as_select(), DbPage::as_select()))
            .first::<(DbProductCollection, DbPage)>(&mut conn)
            .optional()?;

        Ok(row.map(DomainProductCollection::from))
    }

    fn get_collection_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<DomainProductCollection>> {
        use crate::schema::{pages, product_collections};

        let mut conn = self.conn()?;

        let row = product_collections::table
            .inner_join(pages::table)
            .filter(product_collections::name.eq(name))
            .select((DbProductCollection::as_select(), DbPage::as_select()))
            .first::<(DbProductCollection, DbPage)>(&mut conn)
            .optional()?;

        Ok(row.map(DomainProductCollection::from))
    }

    fn list_collections(
        &self,
        query: CollectionListQuery,
    ) -> RepositoryResult<Vec<DomainProductCollection>> {
        use crate::schema::{pages, product_collections};

        let mut conn = self.conn()?;

        let mut items = product_collections::table
            .inner_join(pages::table)
            .select((DbProductCollection::as_select(), DbPage::as_select()))
            .filter(pages::site_id.eq(query.site_id))
            .into_boxed::<Sqlite>();

        if let Some(parent_id) = query.parent_id {
            items = items.filter(pages::parent_id.eq(Some(parent_id)));
        }

        if query.live_only {
            items = items.filter(pages::live.eq(true));
        }

        let rows = items
            .order(pages::path.asc())
            .load::<(DbProductCollection, DbPage)>(&mut conn)?;

        Ok(rows.into_iter().map(DomainProductCollection::from).collect())
    }

    fn list_collection_custom_fields(
        &self,
        collection_id: i32,
    ) -> RepositoryResult<Vec<DomainCustomField>> {
        use crate::schema::product_collection_custom_fields as fields;

        let mut conn = self.conn()?;

        let rows = fields::table
            .filter(fields::collection_id.eq(collection_id))
            .order((fields::sort_order.asc(), fields::id.asc()))
            .load::<DbCollectionCustomField>(&mut conn)?;

        Ok(rows.into_iter().map(DomainCustomField::from).collect())
    }

    fn list_collection_images(
        &self,
        collection_id: i32,
    ) -> RepositoryResult<Vec<DomainCollectionImage>> {
        use crate::schema::{collection_images, images};

        let mut conn = self.conn()?;

        let rows = collection_images::table
            .left_join(images::table)
            .filter(collection_images::collection_id.eq(collection_id))
            .order((
                collection_images::sort_order.asc(),
                collection_images::id.asc(),
            ))
            .select((DbCollectionImage::as_select(), Option::<DbImage>::as_select()))
            .load::<(DbCollectionImage, Option<DbImage>)>(&mut conn)?;

        Ok(rows.into_iter().map(DomainCollectionImage::from).collect())
    }
}

impl CollectionWriter for DieselRepository {
    fn create_collection(
        &self,
        new_collection: &DomainNewProductCollection,
    ) -> RepositoryResult<DomainProductCollection> {
        use crate::schema::product_collections;

        let mut conn = self.conn()?;

        conn.transaction::<DomainProductCollection, RepositoryError, _>(|conn| {
            let page = insert_page(conn, &new_collection.page)?;

            let insertable = DbNewProductCollection::from_domain(page.id, new_collection);
            let created = diesel::insert_into(product_collections::table)
                .values(&insertable)
                .get_result::<DbProductCollection>(conn)?;

            Ok((created, page).into())
        })
    }

    fn add_collection_custom_field(
        &self,
        field: &NewCustomField,
    ) -> RepositoryResult<DomainCustomField> {
        use crate::schema::product_collection_custom_fields as fields;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCustomField, RepositoryError, _>(|conn| {
            ensure_collection(conn, field.owner_id)?;

            let last = fields::table
                .filter(fields::collection_id.eq(field.owner_id))
                .select(diesel::dsl::max(fields::sort_order))
                .first::<Option<i32>>(conn)?;

            let insertable = DbNewCollectionCustomField {
                collection_id: field.owner_id,
                sort_order: last.map_or(0, |value| value + 1),
                name: field.name.as_str(),
                options: field.options.as_deref(),
            };

            let created = diesel::insert_into(fields::table)
                .values(&insertable)
                .get_result::<DbCollectionCustomField>(conn)?;

            Ok(created.into())
        })
    }

    fn add_collection_image(
        &self,
        link: &NewImageLink,
    ) -> RepositoryResult<DomainCollectionImage> {
        use crate::schema::{collection_images, images};

        let mut conn = self.conn()?;

        conn.transaction::<DomainCollectionImage, RepositoryError, _>(|conn| {
            ensure_collection(conn, link.owner_id)?;

            let last = collection_images::table
                .filter(collection_images::collection_id.eq(link.owner_id))
                .select(diesel::dsl::max(collection_images::sort_order))
                .first::<Option<i32>>(conn)?;

            let insertable = DbNewCollectionImage {
                collection_id: link.owner_id,
                sort_order: last.map_or(0, |value| value + 1),
                image_id: link.image_id,
            };

            let created = diesel::insert_into(collection_images::table)
                .values(&insertable)
                .get_result::<DbCollectionImage>(conn)?;

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

fn ensure_collection(conn: &mut SqliteConnection, collection_id: i32) -> RepositoryResult<()> {
    use crate::schema::product_collections;

    let found = product_collections::table
        .filter(product_collections::page_id.eq(collection_id))
        .select(product_collections::page_id)
        .first::<i32>(conn)
        .optional()?;

    match found {
        Some(_) => Ok(()),
        None => Err(RepositoryError::NotFound),
    }
}
