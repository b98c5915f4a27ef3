mod parse;
mod record;
mod source;
mod store;

pub use parse::parse_records;
pub use record::{PublicationRecord, UNKNOWN_YEAR};
pub use source::DataSource;
pub use store::RecordStore;
