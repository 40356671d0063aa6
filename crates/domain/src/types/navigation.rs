//! Navigation types

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of screens the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Register,
    Login,
    Home,
    EditProfile,
}

impl Screen {
    /// Root screens intercept the hardware back button with an exit prompt
    /// instead of popping history.
    pub fn is_root(self) -> bool {
        matches!(self, Screen::Home | Screen::Login | Screen::Register)
    }

    /// Screens that require a signed-in identity.
    pub fn requires_auth(self) -> bool {
        matches!(self, Screen::Home | Screen::EditProfile)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Register => "Register",
            Screen::Login => "Login",
            Screen::Home => "Home",
            Screen::EditProfile => "EditProfile",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_auth_classification() {
        assert!(Screen::Home.is_root());
        assert!(Screen::Login.is_root());
        assert!(Screen::Register.is_root());
        assert!(!Screen::EditProfile.is_root());

        assert!(Screen::Home.requires_auth());
        assert!(Screen::EditProfile.requires_auth());
        assert!(!Screen::Login.requires_auth());
        assert!(!Screen::Register.requires_auth());
    }
}
