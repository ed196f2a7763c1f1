pub(crate) mod card;
pub(crate) mod document;
pub(crate) mod slide;
pub(crate) mod style;
pub(crate) mod svg;
