pub(crate) mod config;
pub(crate) mod entrance;
pub(crate) mod item;
pub(crate) mod layout;
pub(crate) mod schedule;
