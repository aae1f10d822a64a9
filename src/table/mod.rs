pub mod read;
pub mod types;
pub mod write;

pub use read::{read_table, read_table_from};
pub use types::{Row, Table};
pub use write::{write_table, write_table_to};
