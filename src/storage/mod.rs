pub mod sqlite;
pub mod traits;

pub use sqlite::{SqliteNewsRepository, SqliteStorage};
pub use traits::{save_all, NewsRepository, NewsRow};
