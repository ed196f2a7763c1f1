pub(crate) mod model;
pub(crate) mod parse;
pub(crate) mod planner;
#[cfg(feature = "remote")]
pub(crate) mod remote;
pub(crate) mod snapshot;
