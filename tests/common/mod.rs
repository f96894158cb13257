//! Helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use pushkind_common::db::{DbPool, establish_connection_pool};
use pushkind_storefront::domain::page::{NewPage, Page, PageType};
use pushkind_storefront::repository::{DieselRepository, PageWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests. The file lives in its own
/// directory, removed together with the database on drop.
pub struct TestDb {
    dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("Temporary path is not valid UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb { dir, path, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Creates a live page of `page_type` below `parent`.
pub fn live_page(
    repo: &DieselRepository,
    site_id: i32,
    parent: Option<&Page>,
    title: &str,
    page_type: PageType,
) -> Page {
    let slug = title.to_lowercase().replace(' ', "-");
    let mut new_page = NewPage::new(site_id, title, slug, page_type).live();
    if let Some(parent) = parent {
        new_page = new_page.with_parent_id(parent.id);
    }
    repo.create_page(&new_page).expect("failed to create page")
}
