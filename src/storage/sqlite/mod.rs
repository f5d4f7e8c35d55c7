mod connection;
mod news_repository;

pub use connection::SqliteStorage;
pub use news_repository::SqliteNewsRepository;
