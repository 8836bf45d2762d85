pub(crate) mod ease;
pub(crate) mod group;
pub(crate) mod lerp;
