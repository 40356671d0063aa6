//! Domain data types

pub mod document;
pub mod identity;
pub mod navigation;
pub mod profile;

pub use document::{DocumentFields, FieldValue};
pub use identity::{AuthState, Identity};
pub use navigation::Screen;
pub use profile::{ProfileUpdate, RegistrationForm, UserProfile};
