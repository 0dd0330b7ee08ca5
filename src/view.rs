//! Capability surface the bouncer needs from the UI toolkit.
//!
//! The bouncer never sees concrete widgets. A host wires a container, a
//! builder producing the overlay root plus its security controller, and the
//! shared credential/mediator handles handed to every new controller.

use std::rc::Rc;

use crate::security::{KeyEvent, SecurityMode};
use crate::theme::Background;

/// Identity of one inflated overlay root. A new id is minted per inflate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Invisible,
}

/// Action run once the lockscreen has been dismissed. Returning `true` means
/// the action will finish the dismissal itself.
pub type DismissAction = Box<dyn FnMut() -> bool>;

/// Completion callback for the pre-hide animation.
pub type FinishedCallback = Box<dyn FnOnce()>;

/// View group the overlay root is attached to.
pub trait ContainerView {
    /// Append `child` as the last child.
    fn add_child(&mut self, child: ViewId);
    fn remove_child(&mut self, child: ViewId);
    /// Whether `child` is currently parented directly under this container.
    fn has_child(&self, child: ViewId) -> bool;
    fn child_count(&self) -> usize;
}

/// Root of the inflated overlay tree.
pub trait OverlayRoot {
    fn visibility(&self) -> Visibility;
    fn set_visibility(&mut self, visibility: Visibility);
    fn set_background(&mut self, background: Background);
}

/// Lock pattern / credential storage helpers shared by every controller.
pub trait CredentialUtils {}

/// Channel back to the keyguard mediator shared by every controller.
pub trait ViewMediatorCallback {}

/// The embedded security challenge hosted inside the overlay.
pub trait SecurityController {
    fn set_credential_utils(&mut self, utils: Rc<dyn CredentialUtils>);
    fn set_mediator_callback(&mut self, callback: Rc<dyn ViewMediatorCallback>);

    /// Refresh for the current security method.
    fn show(&mut self);
    fn on_resume(&mut self);
    fn on_pause(&mut self);
    fn request_focus(&mut self);

    /// Dismiss the keyguard without a challenge. Returns `false` when a
    /// credential is required.
    fn dismiss(&mut self) -> bool;

    fn start_appear_animation(&mut self);
    /// Run the disappear animation and invoke `on_finished` once it ends.
    fn start_disappear_animation(&mut self, on_finished: Option<FinishedCallback>);

    fn security_mode(&self) -> SecurityMode;

    fn handle_back_key(&mut self) -> bool;
    fn handle_menu_key(&mut self) -> bool;
    fn intercept_media_key(&mut self, event: &KeyEvent) -> bool;

    /// Idle timeout in milliseconds; negative means "use the default".
    fn user_activity_timeout_ms(&self) -> i64;

    /// Release transient resources such as entered digits.
    fn clean_up(&mut self);
    fn set_on_dismiss_action(&mut self, action: Option<DismissAction>);
}

pub struct InflatedOverlay {
    pub root: Box<dyn OverlayRoot>,
    pub controller: Box<dyn SecurityController>,
}

/// Constructs the overlay widget graph.
pub trait OverlayBuilder {
    fn build(&mut self) -> anyhow::Result<InflatedOverlay>;
}

impl<F> OverlayBuilder for F
where
    F: FnMut() -> anyhow::Result<InflatedOverlay>,
{
    fn build(&mut self) -> anyhow::Result<InflatedOverlay> {
        self()
    }
}
