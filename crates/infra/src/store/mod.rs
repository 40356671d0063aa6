pub mod client;
pub mod wire;

pub use client::{RestDocumentStore, TokenSource};
pub use wire::{WireDocument, WireValue};
