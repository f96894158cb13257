use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::image::{Image as DomainImage, NewImage as DomainNewImage};
use crate::models::image::{Image as DbImage, NewImage as DbNewImage};
use crate::repository::{DieselRepository, ImageReader, ImageWriter};

impl ImageReader for DieselRepository {
    fn get_image_by_id(
        &self,
        image_id: i32,
        site_id: i32,
    ) -> RepositoryResult<Option<DomainImage>> {
        use crate::schema::images;

        let mut conn = self.conn()?;

        let image = images::table
            .filter(images::id.eq(image_id))
            .filter(images::site_id.eq(site_id))
            .first::<DbImage>(&mut conn)
            .optional()?;

        Ok(image.map(DomainImage::from))
    }

    fn list_images(&self, site_id: i32) -> RepositoryResult<Vec<DomainImage>> {
        use crate::schema::images;

        let mut conn = self.conn()?;

        let items = images::table
            .filter(images::site_id.eq(site_id))
            .order(images::created_at.desc())
            .load::<DbImage>(&mut conn)?;

        Ok(items.into_iter().map(DomainImage::from).collect())
    }
}

impl ImageWriter for DieselRepository {
    fn create_image(&self, new_image: &DomainNewImage) -> RepositoryResult<DomainImage> {
        use crate::schema::images;

        let mut conn = self.conn()?;
        let insertable = DbNewImage::from(new_image);

        let created = diesel::insert_into(images::table)
            .values(&insertable)
            .get_result::<DbImage>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_image(&self, image_id: i32, site_id: i32) -> RepositoryResult<()> {
        use crate::schema::{collection_images, images, product_images, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let found = images::table
                .filter(images::id.eq(image_id))
                .filter(images::site_id.eq(site_id))
                .select(images::id)
                .first::<i32>(conn)
                .optional()?;

            if found.is_none() {
                return Err(RepositoryError::NotFound);
            }

            diesel::update(
                product_images::table.filter(product_images::image_id.eq(Some(image_id))),
            )
            .set(product_images::image_id.eq::<Option<i32>>(None))
            .execute(conn)?;
            diesel::update(
                collection_images::table.filter(collection_images::image_id.eq(Some(image_id))),
            )
            .set(collection_images::image_id.eq::<Option<i32>>(None))
            .execute(conn)?;
            diesel::update(products::table.filter(products::image_id.eq(Some(image_id))))
                .set(products::image_id.eq::<Option<i32>>(None))
                .execute(conn)?;

            diesel::delete(images::table.filter(images::id.eq(image_id))).execute(conn)?;

            Ok(())
        })
    }
}
