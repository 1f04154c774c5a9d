//! Domain layer: the records exchanged between modules and the host.
//!
//! These types carry no behaviour beyond validation and storage. They are
//! plain owned values: handing one to the host moves or clones it, so a module
//! can never mutate an instance the host is still reading.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`entry`]: [`Entry`] records and the [`EntryType`] vocabulary
//! - [`selection`]: [`Selection`] navigation history steps
//! - [`global`]: [`ModuleGlobal`] host-wide display defaults
//! - [`opaque`]: [`Opaque`] module-owned pass-through values
//!
//! # Examples
//!
//! ```
//! use pext_contract::domain::{Entry, Result, Selection};
//!
//! fn history() -> Result<Vec<Selection>> {
//!     let mut step = Selection::default();
//!     step.set_entry_from_value(&serde_json::json!({"name": "Display"}))?;
//!     Ok(vec![step, Selection::new(Entry::new("Brightness"))])
//! }
//! # assert_eq!(history().unwrap().len(), 2);
//! ```

pub mod entry;
pub mod error;
pub mod global;
pub mod opaque;
pub mod selection;

pub use entry::{Entry, EntryType};
pub use error::{PextError, Result};
pub use global::ModuleGlobal;
pub use opaque::Opaque;
pub use selection::Selection;
