pub(crate) mod volume;
