pub mod db;
pub mod memory;

pub use db::PgAdapter;
pub use memory::InMemoryAdapter;
