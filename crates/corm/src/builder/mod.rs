//! Statement text builders.
//!
//! Pure functions from `(dialect, mapping metadata, record)` to SQL
//! text. No builder touches a connection; execution belongs to the
//! driver layer. Column order always follows field declaration order.

mod delete;
mod filter;
mod insert;
mod select;
mod update;

pub use delete::delete;
pub use filter::filter;
pub use insert::insert;
pub use select::{get_by_key, select};
pub use update::update;
