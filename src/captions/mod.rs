pub(crate) mod srt;
