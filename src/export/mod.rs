pub(crate) mod bridge;
pub(crate) mod command;
pub(crate) mod exporter;
pub(crate) mod placeholder;
pub(crate) mod svg_raster;
