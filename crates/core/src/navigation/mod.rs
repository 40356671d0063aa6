//! Navigation: screen state machine and splash gating

pub mod machine;
pub mod splash;
