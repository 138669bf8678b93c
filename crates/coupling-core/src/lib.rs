pub mod changeset;
pub mod check;
pub mod config;
pub mod error;
pub mod git;
pub mod io;
pub mod links;
pub mod paths;
pub mod rule;
pub mod settings;

pub use error::{CouplingError, Result};
