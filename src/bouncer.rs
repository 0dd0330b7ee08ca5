use std::rc::Rc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::scheduler::{FrameScheduler, FrameToken};
use crate::security::{KeyEvent, SecurityMode};
use crate::settings::BouncerSettings;
use crate::theme::{DisplayRotation, ThemeResolver};
use crate::view::{
    ContainerView, CredentialUtils, DismissAction, FinishedCallback, InflatedOverlay,
    OverlayBuilder, OverlayRoot, SecurityController, ViewId, ViewMediatorCallback, Visibility,
};

/// Where the bouncer currently sits in its show/hide lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BouncerState {
    /// No overlay has been inflated.
    Absent,
    Hidden,
    /// A deferred show is queued on the frame scheduler.
    PendingShow,
    Shown,
}

impl BouncerState {
    pub fn is_showing(self) -> bool {
        matches!(self, Self::PendingShow | Self::Shown)
    }
}

/// Collaborators owned by the bouncer.
pub struct BouncerDeps {
    pub container: Box<dyn ContainerView>,
    pub builder: Box<dyn OverlayBuilder>,
    pub scheduler: Box<dyn FrameScheduler>,
    pub rotation: Box<dyn DisplayRotation>,
    pub credential_utils: Rc<dyn CredentialUtils>,
    pub mediator_callback: Rc<dyn ViewMediatorCallback>,
}

struct Overlay {
    id: ViewId,
    root: Box<dyn OverlayRoot>,
    controller: Box<dyn SecurityController>,
}

impl Overlay {
    fn is_visible(&self) -> bool {
        self.root.visibility() == Visibility::Visible
    }
}

/// Manages the security challenge overlay shown above the lockscreen.
///
/// All calls are expected on the UI thread. The deferred part of [`show`]
/// arrives through [`on_frame`] once the scheduler reports the posted token.
///
/// [`show`]: KeyguardBouncer::show
/// [`on_frame`]: KeyguardBouncer::on_frame
pub struct KeyguardBouncer {
    container: Box<dyn ContainerView>,
    builder: Box<dyn OverlayBuilder>,
    scheduler: Box<dyn FrameScheduler>,
    credential_utils: Rc<dyn CredentialUtils>,
    mediator_callback: Rc<dyn ViewMediatorCallback>,
    theme: ThemeResolver,
    force_theme: bool,
    fallback_color: u32,
    show_delay: Duration,
    default_user_activity_timeout: Duration,
    overlay: Option<Overlay>,
    pending_show: Option<FrameToken>,
    next_view_id: u64,
}

impl KeyguardBouncer {
    pub fn new(settings: &BouncerSettings, deps: BouncerDeps) -> Self {
        Self {
            container: deps.container,
            builder: deps.builder,
            scheduler: deps.scheduler,
            credential_utils: deps.credential_utils,
            mediator_callback: deps.mediator_callback,
            theme: ThemeResolver::new(settings.theme_root.clone(), deps.rotation),
            force_theme: settings.force_theme,
            fallback_color: settings.fallback_color,
            show_delay: settings.show_delay(),
            default_user_activity_timeout: settings.default_user_activity_timeout(),
            overlay: None,
            pending_show: None,
            next_view_id: 0,
        }
    }

    pub fn state(&self) -> BouncerState {
        match (&self.overlay, self.pending_show) {
            (None, _) => BouncerState::Absent,
            (Some(_), Some(_)) => BouncerState::PendingShow,
            (Some(overlay), None) if overlay.is_visible() => BouncerState::Shown,
            (Some(_), None) => BouncerState::Hidden,
        }
    }

    /// Id of the currently tracked overlay root, if any.
    pub fn overlay_id(&self) -> Option<ViewId> {
        self.overlay.as_ref().map(|overlay| overlay.id)
    }

    pub fn show(&mut self) -> Result<()> {
        let showing_soon = self.pending_show.is_some();
        let overlay = self.ensure_view()?;
        if showing_soon || overlay.is_visible() {
            // Already up or about to be: only refresh for the current security
            // method, which may have changed underneath us.
            overlay.controller.show();
            return Ok(());
        }

        // With no credential set this dismisses the whole keyguard and the
        // bouncer never becomes visible.
        if overlay.controller.dismiss() {
            tracing::debug!("keyguard dismissed without a challenge");
            return Ok(());
        }

        let token = self.scheduler.post_delayed(self.show_delay);
        self.pending_show = Some(token);
        tracing::debug!(
            from = ?BouncerState::Hidden,
            to = ?BouncerState::PendingShow,
            token = token.raw(),
            "bouncer show deferred"
        );
        Ok(())
    }

    pub fn show_with_dismiss_action(&mut self, action: DismissAction) -> Result<()> {
        self.ensure_view()?
            .controller
            .set_on_dismiss_action(Some(action));
        self.show()
    }

    /// Deliver a due frame callback. Tokens that are not the outstanding
    /// deferred show are ignored.
    pub fn on_frame(&mut self, token: FrameToken) {
        if self.pending_show != Some(token) {
            tracing::trace!(token = token.raw(), "ignoring stale frame callback");
            return;
        }
        self.pending_show = None;
        let Some(overlay) = self.overlay.as_mut() else {
            tracing::warn!("deferred show fired without an overlay");
            return;
        };
        overlay.root.set_visibility(Visibility::Visible);
        overlay.controller.on_resume();
        overlay.controller.start_appear_animation();
        tracing::debug!(
            from = ?BouncerState::PendingShow,
            to = ?BouncerState::Shown,
            "bouncer shown"
        );
    }

    pub fn hide(&mut self, destroy_view: bool) {
        self.cancel_pending_show();
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.controller.set_on_dismiss_action(None);
            overlay.controller.clean_up();
        }
        if destroy_view {
            self.remove_view();
        } else if let Some(overlay) = self.overlay.as_mut() {
            overlay.root.set_visibility(Visibility::Invisible);
        }
        tracing::debug!(destroy_view, to = ?self.state(), "bouncer hidden");
    }

    /// Play the disappear animation before the keyguard goes away.
    ///
    /// Without an overlay `on_finished` runs immediately, so callers can rely
    /// on it eventually being invoked either way.
    pub fn start_pre_hide_animation(&mut self, on_finished: Option<FinishedCallback>) {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.controller.start_disappear_animation(on_finished),
            None => {
                if let Some(on_finished) = on_finished {
                    on_finished();
                }
            }
        }
    }

    /// Throw away the current overlay and inflate a fresh, hidden one.
    pub fn reset(&mut self) -> Result<()> {
        self.cancel_pending_show();
        self.inflate_view()
    }

    pub fn on_screen_turned_off(&mut self) {
        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.is_visible() {
                overlay.controller.on_pause();
            }
        }
    }

    pub fn user_activity_timeout(&self) -> Duration {
        if let Some(overlay) = &self.overlay {
            let timeout = overlay.controller.user_activity_timeout_ms();
            if let Ok(timeout) = u64::try_from(timeout) {
                return Duration::from_millis(timeout);
            }
        }
        self.default_user_activity_timeout
    }

    /// Whether the bouncer is visible or a deferred show is queued.
    pub fn is_showing(&self) -> bool {
        self.pending_show.is_some() || self.overlay.as_ref().is_some_and(Overlay::is_visible)
    }

    /// Inflate the overlay ahead of time so a later `show` is cheap.
    pub fn prepare(&mut self) -> Result<()> {
        self.ensure_view()?;
        Ok(())
    }

    pub fn on_back_pressed(&mut self) -> bool {
        self.overlay
            .as_mut()
            .is_some_and(|overlay| overlay.controller.handle_back_key())
    }

    /// True when the current security method must be answered before
    /// anything else on the lockscreen is shown, i.e. SIM PIN/PUK.
    pub fn needs_fullscreen_bouncer(&self) -> bool {
        self.security_mode().is_some_and(SecurityMode::is_sim)
    }

    /// Whether unlocking requires a credential.
    ///
    /// Without an inflated overlay the answer is `true`: a torn down bouncer
    /// says nothing about the device being insecure.
    pub fn is_secure(&self) -> bool {
        self.security_mode()
            .map_or(true, |mode| mode != SecurityMode::None)
    }

    pub fn security_mode(&self) -> Option<SecurityMode> {
        self.overlay
            .as_ref()
            .map(|overlay| overlay.controller.security_mode())
    }

    pub fn on_menu_pressed(&mut self) -> Result<bool> {
        let overlay = self.ensure_view()?;
        if !overlay.controller.handle_menu_key() {
            return Ok(false);
        }
        // Show it in case it is secure. If not, it gets dismissed anyway.
        overlay.root.set_visibility(Visibility::Visible);
        overlay.controller.request_focus();
        overlay.controller.on_resume();
        // Visible now, so a queued deferred show has nothing left to do.
        self.cancel_pending_show();
        Ok(true)
    }

    pub fn intercept_media_key(&mut self, event: &KeyEvent) -> Result<bool> {
        Ok(self.ensure_view()?.controller.intercept_media_key(event))
    }

    fn cancel_pending_show(&mut self) {
        if let Some(token) = self.pending_show.take() {
            self.scheduler.remove(token);
            tracing::debug!(token = token.raw(), "cancelled deferred bouncer show");
        }
    }

    fn ensure_view(&mut self) -> Result<&mut Overlay> {
        if self.overlay.is_none() {
            self.inflate_view()?;
        }
        self.overlay
            .as_mut()
            .ok_or_else(|| anyhow!("bouncer overlay missing after inflate"))
    }

    fn inflate_view(&mut self) -> Result<()> {
        self.remove_view();
        if let Some(stale) = self.overlay.take() {
            tracing::debug!(view = stale.id.0, "discarding overlay owned by another parent");
        }

        let InflatedOverlay {
            mut root,
            mut controller,
        } = self.builder.build().context("inflate bouncer overlay")?;
        controller.set_credential_utils(Rc::clone(&self.credential_utils));
        controller.set_mediator_callback(Rc::clone(&self.mediator_callback));

        self.next_view_id += 1;
        let id = ViewId(self.next_view_id);
        self.container.add_child(id);
        root.set_visibility(Visibility::Invisible);
        root.set_background(
            self.theme
                .lockscreen_background(self.force_theme, self.fallback_color),
        );

        tracing::debug!(
            view = id.0,
            children = self.container.child_count(),
            "inflated bouncer overlay"
        );
        self.overlay = Some(Overlay {
            id,
            root,
            controller,
        });
        Ok(())
    }

    fn remove_view(&mut self) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        if self.container.has_child(overlay.id) {
            self.container.remove_child(overlay.id);
            self.overlay = None;
        } else {
            tracing::debug!(view = overlay.id.0, "overlay not parented under container");
        }
    }
}
