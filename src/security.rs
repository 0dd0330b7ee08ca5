use std::fmt;

/// Credential method currently guarding unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityMode {
    /// Security mode could not be determined.
    Invalid,
    /// No credential, swipe to unlock.
    None,
    Pattern,
    Pin,
    Password,
    Biometric,
    Account,
    SimPin,
    SimPuk,
}

impl SecurityMode {
    /// SIM challenges must be answered before anything else on the lockscreen
    /// is shown.
    pub fn is_sim(self) -> bool {
        matches!(self, SecurityMode::SimPin | SecurityMode::SimPuk)
    }
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SecurityMode::Invalid => "invalid",
            SecurityMode::None => "none",
            SecurityMode::Pattern => "pattern",
            SecurityMode::Pin => "pin",
            SecurityMode::Password => "password",
            SecurityMode::Biometric => "biometric",
            SecurityMode::Account => "account",
            SecurityMode::SimPin => "sim-pin",
            SecurityMode::SimPuk => "sim-puk",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// Media key forwarded to the bouncer while it owns input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: u32,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn down(code: u32) -> Self {
        Self {
            code,
            action: KeyAction::Down,
        }
    }

    pub fn up(code: u32) -> Self {
        Self {
            code,
            action: KeyAction::Up,
        }
    }
}
