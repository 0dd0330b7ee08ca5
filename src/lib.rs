pub mod bouncer;
pub mod date_label;
pub mod logging;
pub mod scheduler;
pub mod security;
pub mod settings;
pub mod theme;
pub mod view;

pub use bouncer::{BouncerDeps, BouncerState, KeyguardBouncer};
pub use scheduler::{FrameScheduler, FrameToken, ManualFrameClock};
pub use security::{KeyEvent, SecurityMode};
pub use settings::BouncerSettings;
