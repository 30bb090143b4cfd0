pub(crate) mod color;
pub(crate) mod environment;
pub(crate) mod pose;
