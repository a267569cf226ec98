//! Generator for typed syntax node views and their validating data types.
//!
//! The input is an evaluated record store (see [`RecordKeeper`]) describing,
//! per node kind, its category and ordered children. For one category at a
//! time the generator emits Rust source written against the `syntax-tree`
//! runtime:
//!
//! - [`Action::Interface`]: per node kind a cursor enum, the view struct with
//!   its kind tag, and the data struct. Token definitions get a view keyed by
//!   token kind instead of a cursor enum.
//! - [`Action::Implementation`]: per node kind the accessors and `with_*`
//!   builders of the view, and the validating constructor, `make` and
//!   `make_blank` of the data type.
//!
//! Both outputs are meant to be `include!`d into the same module.
//!
//! ```ignore
//! let records = RecordKeeper::load(Path::new("syntax.json"))?;
//! let generator = Generator::new(&records, GeneratorConfig::default());
//! let source = generator.generate(Action::Interface, "Stmt".parse()?)?;
//! ```

mod category;
mod config;
mod data;
mod dispatch;
mod error;
mod layout;
mod records;
mod token;
mod view;

pub use category::{Category, classify};
pub use config::{DEFAULT_RUNTIME_CRATE, GeneratorConfig, Language};
pub use dispatch::{Action, Generator, Target};
pub use error::{GenError, SchemaError};
pub use layout::{ChildSlot, NodeLayout, SlotShape, TokenLayout, format_snake_case};
pub use records::{Init, Record, RecordKeeper, RecordVal};
