mod param;
mod statement;

pub use param::{ParamKind, SqlParam};
pub use statement::Statement;
