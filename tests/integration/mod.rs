// Integration tests for API endpoints
// Router tests run without a database; database tests need TEST_DATABASE_URL

pub mod database_test;
