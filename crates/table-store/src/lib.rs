pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::RecordId;
pub use error::{Result, StoreError};
pub use memory::MemoryTableStore;
pub use postgres::PostgresTableStore;
pub use record::Record;
pub use store::{TableStore, TableStoreExt};
