pub(crate) mod preview;
pub(crate) mod watermark;
