//! # Rules and State Tables
//!
//! * [`Rule`] - one pattern, one [`Emission`], one [`Transition`].
//! * [`StateEntry`] - a rule, or an [`include`] of another state.
//! * [`TableBuilder`] - collects states; [`TableBuilder::build`] compiles them.
//! * [`StateTable`] - the compiled, flattened, shareable table.
//!
//! With the `serde` feature, [`TableDef`] loads a table from JSON.

mod rule;
mod state_table;
mod table_options;

#[cfg(feature = "serde")]
mod table_def;

#[doc(inline)]
pub use rule::*;
#[doc(inline)]
pub use state_table::*;
#[cfg(feature = "serde")]
#[doc(inline)]
pub use table_def::*;
#[doc(inline)]
pub use table_options::*;
