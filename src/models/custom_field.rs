use diesel::prelude::*;

use crate::domain::custom_field::CustomField as DomainCustomField;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_custom_fields)]
pub struct ProductCustomField {
    pub id: i32,
    pub product_id: i32,
    pub sort_order: i32,
    pub name: String,
    pub options: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_custom_fields)]
pub struct NewProductCustomField<'a> {
    pub product_id: i32,
    pub sort_order: i32,
    pub name: &'a str,
    pub options: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_collection_custom_fields)]
pub struct CollectionCustomField {
    pub id: i32,
    pub collection_id: i32,
    pub sort_order: i32,
    pub name: String,
    pub options: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_collection_custom_fields)]
pub struct NewCollectionCustomField<'a> {
    pub collection_id: i32,
    pub sort_order: i32,
    pub name: &'a str,
    pub options: Option<&'a str>,
}

impl From<ProductCustomField> for DomainCustomField {
    fn from(value: ProductCustomField) -> Self {
        Self {
            id: value.id,
            owner_id: value.product_id,
            sort_order: value.sort_order,
            name: value.name,
            options: value.options,
        }
    }
}

impl From<CollectionCustomField> for DomainCustomField {
    fn from(value: CollectionCustomField) -> Self {
        Self {
            id: value.id,
            owner_id: value.collection_id,
            sort_order: value.sort_order,
            name: value.name,
            options: value.options,
        }
    }
}
