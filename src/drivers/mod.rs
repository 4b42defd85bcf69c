mod in_memory;
mod postgres;

pub use self::in_memory::{InMemoryDriver, RecordedQuery, ResponseBuilder};
pub use self::postgres::PostgresDriver;
