use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::page::{NewPage, Page, PageListQuery, PageTreeNode, PageType, ROOT_URL_PATH};
use crate::forms::pages::{AddPageForm, CatalogRootForm};
use crate::repository::{CollectionReader, ImageReader, PageReader, PageWriter, ProductReader};
use crate::services::collections::{CollectionEditorData, load_collection_editor};
use crate::services::products::{ProductEditorData, load_product_editor};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the page tree overview.
pub struct PageTreeData {
    /// Root pages with their descendants, in tree order.
    pub tree: Vec<PageTreeNode>,
    /// Flat list of all pages, used for parent and catalog root pickers.
    pub pages: Vec<Page>,
}

/// Loads the full page tree of the user's site.
pub fn load_page_tree<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<PageTreeData>
where
    R: PageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let pages = repo
        .list_pages(PageListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;

    let tree = build_page_tree(&pages);

    Ok(PageTreeData { tree, pages })
}

/// Data required to render the editor of a single page.
pub struct PageEditorData {
    pub page: Page,
    /// Every page of the site, for the catalog root picker.
    pub pages: Vec<Page>,
    /// Set when the page is a product page.
    pub product: Option<ProductEditorData>,
    /// Set when the page is a collection page.
    pub collection: Option<CollectionEditorData>,
}

/// Loads a page of the user's site along with its type-specific editor data.
pub fn load_page_editor<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page_id: i32,
) -> ServiceResult<PageEditorData>
where
    R: PageReader + ProductReader + CollectionReader + ImageReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let page = repo
        .get_page_by_id(page_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let pages = repo
        .list_pages(PageListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;

    let product = match page.page_type {
        PageType::Product => Some(load_product_editor(repo, user, page.id)?),
        _ => None,
    };
    let collection = match page.page_type {
        PageType::Collection => Some(load_collection_editor(repo, user, page.id)?),
        _ => None,
    };

    Ok(PageEditorData {
        page,
        pages,
        product,
        collection,
    })
}

/// Creates a home, shop or plain page.
pub fn create_page<R>(repo: &R, user: &AuthenticatedUser, form: AddPageForm) -> ServiceResult<Page>
where
    R: PageReader + PageWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_page = form
        .into_new_page(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_url_path_free(repo, &new_page)?;

    repo.create_page(&new_page).map_err(ServiceError::from)
}

/// Publishes or unpublishes a page. Descendants keep their own flag.
pub fn set_page_visibility<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page_id: i32,
    live: bool,
) -> ServiceResult<Page>
where
    R: PageWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.set_page_live(page_id, user.hub_id, live)
        .map_err(ServiceError::from)
}

/// Points a container page at an explicit catalog root, or clears it.
pub fn assign_catalog_root<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page_id: i32,
    form: CatalogRootForm,
) -> ServiceResult<Page>
where
    R: PageWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let catalog_root_id = form
        .into_catalog_root_id()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.set_catalog_root(page_id, user.hub_id, catalog_root_id)
        .map_err(ServiceError::from)
}

/// Deletes a page together with its whole subtree.
pub fn remove_page<R>(repo: &R, user: &AuthenticatedUser, page_id: i32) -> ServiceResult<()>
where
    R: PageWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_page(page_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Rejects a page whose URL path is already taken on its site.
///
/// A missing parent is reported as `NotFound`.
pub(crate) fn ensure_url_path_free<R>(repo: &R, new_page: &NewPage) -> ServiceResult<()>
where
    R: PageReader + ?Sized,
{
    let url_path = match new_page.parent_id {
        Some(parent_id) => repo
            .get_page_by_id(parent_id, new_page.site_id)
            .map_err(ServiceError::from)?
            .ok_or(ServiceError::NotFound)?
            .child_url_path(&new_page.slug),
        None => ROOT_URL_PATH.to_string(),
    };

    let taken = repo
        .get_page_by_url_path(new_page.site_id, &url_path)
        .map_err(ServiceError::from)?;

    match taken {
        Some(_) => Err(ServiceError::Conflict),
        None => Ok(()),
    }
}

/// Nests a tree-ordered flat page list. Children keep the input order.
fn build_page_tree(pages: &[Page]) -> Vec<PageTreeNode> {
    let mut children_by_parent: HashMap<Option<i32>, Vec<&Page>> = HashMap::new();

    for page in pages {
        children_by_parent
            .entry(page.parent_id)
            .or_default()
            .push(page);
    }

    fn build_branch(
        parent_id: Option<i32>,
        grouped: &HashMap<Option<i32>, Vec<&Page>>,
    ) -> Vec<PageTreeNode> {
        match grouped.get(&parent_id) {
            Some(children) => children
                .iter()
                .map(|page| {
                    let sub_tree = build_branch(Some(page.id), grouped);
                    PageTreeNode::new((*page).clone()).with_children(sub_tree)
                })
                .collect(),
            None => Vec::new(),
        }
    }

    build_branch(None, &children_by_parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

    use crate::repository::mock::{MockPageReader, MockPageWriter};

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    struct MockPageRepo {
        reader: MockPageReader,
        writer: MockPageWriter,
    }

    impl MockPageRepo {
        fn new() -> Self {
            Self {
                reader: MockPageReader::new(),
                writer: MockPageWriter::new(),
            }
        }
    }

    impl PageReader for MockPageRepo {
        fn get_page_by_id(&self, page_id: i32, site_id: i32) -> RepositoryResult<Option<Page>> {
            self.reader.get_page_by_id(page_id, site_id)
        }

        fn get_page_by_url_path(
            &self,
            site_id: i32,
            url_path: &str,
        ) -> RepositoryResult<Option<Page>> {
            self.reader.get_page_by_url_path(site_id, url_path)
        }

        fn list_pages(&self, query: PageListQuery) -> RepositoryResult<Vec<Page>> {
            self.reader.list_pages(query)
        }

        fn first_descendant(&self, page: &Page) -> RepositoryResult<Option<Page>> {
            self.reader.first_descendant(page)
        }

        fn first_sibling(&self, page: &Page) -> RepositoryResult<Option<Page>> {
            self.reader.first_sibling(page)
        }
    }

    impl PageWriter for MockPageRepo {
        fn create_page(&self, new_page: &NewPage) -> RepositoryResult<Page> {
            self.writer.create_page(new_page)
        }

        fn set_page_live(&self, page_id: i32, site_id: i32, live: bool) -> RepositoryResult<Page> {
            self.writer.set_page_live(page_id, site_id, live)
        }

        fn set_catalog_root(
            &self,
            page_id: i32,
            site_id: i32,
            catalog_root_id: Option<i32>,
        ) -> RepositoryResult<Page> {
            self.writer.set_catalog_root(page_id, site_id, catalog_root_id)
        }

        fn delete_page(&self, page_id: i32, site_id: i32) -> RepositoryResult<()> {
            self.writer.delete_page(page_id, site_id)
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

    fn sample_page(id: i32, parent_id: Option<i32>, path: &str, url_path: &str) -> Page {
        Page {
            id,
            site_id: 9,
            parent_id,
            path: path.to_string(),
            depth: (path.len() / 4) as i32,
            title: format!("Page {id}"),
            slug: format!("page-{id}"),
            url_path: url_path.to_string(),
            page_type: PageType::Generic,
            live: true,
            catalog_root_id: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn shop_form(parent_id: &str) -> AddPageForm {
        AddPageForm {
            parent_id: Some(parent_id.to_string()),
            title: "Shop".to_string(),
            slug: None,
            page_type: "shop".to_string(),
            live: true,
            catalog_root_id: None,
        }
    }

    #[test]
    fn load_page_tree_requires_role() {
        let repo = MockPageReader::new();
        let user = user_with_roles(&[]);

        let result = load_page_tree(&repo, &user);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_page_tree_nests_pages_in_tree_order() {
        let mut repo = MockPageReader::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_pages()
            .times(1)
            .withf(|query| query.site_id == 9 && !query.live_only)
            .returning(|_| {
                Ok(vec![
                    sample_page(1, None, "0001", "/"),
                    sample_page(2, Some(1), "00010001", "/b/"),
                    sample_page(4, Some(2), "000100010001", "/b/c/"),
                    sample_page(3, Some(1), "00010002", "/a/"),
                ])
            });

        let data = load_page_tree(&repo, &user).expect("expected tree");

        assert_eq!(data.pages.len(), 4);
        assert_eq!(data.tree.len(), 1);
        let root = &data.tree[0];
        let child_ids: Vec<i32> = root.children.iter().map(|node| node.page.id).collect();
        assert_eq!(child_ids, vec![2, 3]);
        assert_eq!(root.children[0].children[0].page.id, 4);
    }

    #[test]
    fn create_page_rejects_taken_url_path() {
        let mut repo = MockPageRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.reader
            .expect_get_page_by_id()
            .withf(|page_id, site_id| *page_id == 1 && *site_id == 9)
            .returning(|_, _| Ok(Some(sample_page(1, None, "0001", "/"))));
        repo.reader
            .expect_get_page_by_url_path()
            .withf(|_, url_path| url_path == "/shop/")
            .returning(|_, url_path| Ok(Some(sample_page(2, Some(1), "00010001", url_path))));
        repo.writer.expect_create_page().never();

        let result = create_page(&repo, &user, shop_form("1"));

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn create_page_with_unknown_parent_is_not_found() {
        let mut repo = MockPageRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.reader
            .expect_get_page_by_id()
            .returning(|_, _| Ok(None));
        repo.writer.expect_create_page().never();

        let result = create_page(&repo, &user, shop_form("5"));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_page_persists_under_parent() {
        let mut repo = MockPageRepo::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.reader
            .expect_get_page_by_id()
            .returning(|_, _| Ok(Some(sample_page(1, None, "0001", "/"))));
        repo.reader
            .expect_get_page_by_url_path()
            .returning(|_, _| Ok(None));
        repo.writer
            .expect_create_page()
            .times(1)
            .withf(|new_page| {
                new_page.site_id == 9
                    && new_page.parent_id == Some(1)
                    && new_page.slug == "shop"
                    && new_page.page_type == PageType::Shop
            })
            .returning(|_| Ok(sample_page(2, Some(1), "00010001", "/shop/")));

        let page = create_page(&repo, &user, shop_form("1")).expect("expected page");

        assert_eq!(page.url_path, "/shop/");
    }

    #[test]
    fn remove_page_maps_missing_page() {
        let mut repo = MockPageWriter::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_delete_page()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = remove_page(&repo, &user, 77);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn assign_catalog_root_passes_parsed_id() {
        let mut repo = MockPageWriter::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_set_catalog_root()
            .times(1)
            .withf(|page_id, site_id, root| *page_id == 1 && *site_id == 9 && *root == Some(4))
            .returning(|_, _, root| {
                let mut page = sample_page(1, None, "0001", "/");
                page.catalog_root_id = root;
                Ok(page)
            });

        let form = CatalogRootForm {
            catalog_root_id: Some("4".to_string()),
        };
        let page = assign_catalog_root(&repo, &user, 1, form).expect("expected page");

        assert_eq!(page.catalog_root_id, Some(4));
    }
}
