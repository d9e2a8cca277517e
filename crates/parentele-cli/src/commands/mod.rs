//! Command implementations.

pub mod extract;
pub mod import;
pub mod recompute;
pub mod relations;

pub use self::extract::execute_extract;
pub use self::import::execute_import;
pub use self::recompute::{execute_recompute, execute_recompute_act, execute_recompute_actor};
pub use self::relations::execute_relations;
