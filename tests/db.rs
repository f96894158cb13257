mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let db_path;

    {
        let test_db = common::TestDb::new("test_connection.db");
        db_path = test_db.path().to_path_buf();
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
        assert!(db_path.exists());
    }

    assert!(!db_path.exists());
    assert!(!db_path.with_extension("db-shm").exists());
    assert!(!db_path.with_extension("db-wal").exists());
}
