pub mod assign;
pub mod error;
pub mod process;
pub mod table;
pub mod verify;

pub use assign::{assign, build_assignment, Assigned, EmptyRows, IdAssignment, OrderPolicy};
pub use error::MalformedInput;
pub use process::{run, RunConfig, RunSummary};
pub use table::{Row, Table};
