//! Session establishment: retry policy and the session store

pub mod retry;
pub mod store;
