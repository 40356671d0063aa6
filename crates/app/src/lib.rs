//! # Unilink Application
//!
//! Composition layer: wires configuration, the REST adapters, and the core
//! services into a running application, and exposes the screen-component
//! contract through [`AppShell`].

pub mod back;
pub mod context;
pub mod logging;
pub mod shell;

pub use back::BackBinding;
pub use context::AppContext;
pub use shell::AppShell;
