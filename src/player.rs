pub(crate) mod clock;
pub(crate) mod coordinator;
pub(crate) mod event;
