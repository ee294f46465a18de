//! Imports used throughout the crate.
pub use anyhow::{bail, Context, Result};
#[allow(unused_imports)]
pub use log::{debug, error, info, trace, warn};
