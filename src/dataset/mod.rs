pub(crate) mod order;
pub(crate) mod record;
