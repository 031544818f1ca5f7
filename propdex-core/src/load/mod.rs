//! Readers for the files a [`propdex_model::PropellerRecord`] points at.

#[cfg(feature = "images")]
pub mod image;
pub mod propeller;
pub mod table;

#[cfg(feature = "images")]
pub use self::image::{format_hint, load_image};
pub use propeller::{LoadedPropeller, PropellerLoader};
pub use table::{Table, load_table};
