pub mod defaults;
pub mod entropy;
pub mod env;
pub mod error;
pub mod host;
pub mod io;
pub mod materialize;
pub mod paths;
pub mod seed;
pub mod settings;

pub use error::{Result, RuntipiError};
pub use materialize::{materialize, ResolvedEnvironment};
