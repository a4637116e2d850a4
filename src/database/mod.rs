/// Database connection pooling and migrations
pub mod connection;
/// Record types and their CRUD operations
pub mod models;
