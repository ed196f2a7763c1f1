pub(crate) mod provider;
pub(crate) mod raster;
#[cfg(feature = "remote")]
pub(crate) mod remote;
pub(crate) mod resolver;
