#![allow(dead_code)]

use keyguard_bouncer::security::KeyAction;
use keyguard_bouncer::theme::{Background, Rotation};
use keyguard_bouncer::view::{
    ContainerView, CredentialUtils, DismissAction, FinishedCallback, InflatedOverlay,
    OverlayRoot, SecurityController, ViewId, ViewMediatorCallback, Visibility,
};
use keyguard_bouncer::{
    BouncerDeps, BouncerSettings, KeyEvent, KeyguardBouncer, ManualFrameClock, SecurityMode,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub struct NoCredentials;
impl CredentialUtils for NoCredentials {}

pub struct NoMediator;
impl ViewMediatorCallback for NoMediator {}

/// Shared knobs and recordings for the mock overlay collaborators.
#[derive(Clone)]
pub struct MockEnv {
    pub clock: ManualFrameClock,
    pub children: Rc<RefCell<Vec<ViewId>>>,
    pub builds: Rc<Cell<usize>>,
    pub fail_build: Rc<Cell<bool>>,
    pub mode: Rc<Cell<SecurityMode>>,
    pub dismiss_succeeds: Rc<Cell<bool>>,
    pub timeout_ms: Rc<Cell<i64>>,
    pub menu_handled: Rc<Cell<bool>>,
    pub back_handled: Rc<Cell<bool>>,
    pub media_handled: Rc<Cell<bool>>,
    pub calls: Rc<RefCell<Vec<String>>>,
    pub roots: Rc<RefCell<Vec<Rc<Cell<Visibility>>>>>,
    pub backgrounds: Rc<RefCell<Vec<Background>>>,
    pub dismiss_action: Rc<RefCell<Option<DismissAction>>>,
    pub pending_disappear: Rc<RefCell<Option<FinishedCallback>>>,
}

impl Default for MockEnv {
    fn default() -> Self {
        Self {
            clock: ManualFrameClock::new(),
            children: Rc::default(),
            builds: Rc::default(),
            fail_build: Rc::default(),
            mode: Rc::new(Cell::new(SecurityMode::Pin)),
            dismiss_succeeds: Rc::default(),
            timeout_ms: Rc::new(Cell::new(-1)),
            menu_handled: Rc::default(),
            back_handled: Rc::default(),
            media_handled: Rc::default(),
            calls: Rc::default(),
            roots: Rc::default(),
            backgrounds: Rc::default(),
            dismiss_action: Rc::default(),
            pending_disappear: Rc::default(),
        }
    }
}

impl MockEnv {
    pub fn bouncer(&self) -> KeyguardBouncer {
        self.bouncer_with(&BouncerSettings::default(), Rotation::Deg0)
    }

    pub fn bouncer_with(&self, settings: &BouncerSettings, rotation: Rotation) -> KeyguardBouncer {
        let env = self.clone();
        let builder = move || -> anyhow::Result<InflatedOverlay> { env.build() };
        KeyguardBouncer::new(
            settings,
            BouncerDeps {
                container: Box::new(MockContainer {
                    children: Rc::clone(&self.children),
                }),
                builder: Box::new(builder),
                scheduler: Box::new(self.clock.clone()),
                rotation: Box::new(rotation),
                credential_utils: Rc::new(NoCredentials),
                mediator_callback: Rc::new(NoMediator),
            },
        )
    }

    fn build(&self) -> anyhow::Result<InflatedOverlay> {
        if self.fail_build.get() {
            anyhow::bail!("layout inflation failed");
        }
        self.builds.set(self.builds.get() + 1);
        let visibility = Rc::new(Cell::new(Visibility::Visible));
        self.roots.borrow_mut().push(Rc::clone(&visibility));
        Ok(InflatedOverlay {
            root: Box::new(MockRoot {
                visibility,
                backgrounds: Rc::clone(&self.backgrounds),
            }),
            controller: Box::new(MockController { env: self.clone() }),
        })
    }

    /// Advance the frame clock and deliver every due callback.
    pub fn advance(&self, bouncer: &mut KeyguardBouncer, ms: u64) {
        for token in self.clock.advance(Duration::from_millis(ms)) {
            bouncer.on_frame(token);
        }
    }

    pub fn last_visibility(&self) -> Option<Visibility> {
        self.roots.borrow().last().map(|v| v.get())
    }

    pub fn take_calls(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

pub struct MockContainer {
    children: Rc<RefCell<Vec<ViewId>>>,
}

impl ContainerView for MockContainer {
    fn add_child(&mut self, child: ViewId) {
        self.children.borrow_mut().push(child);
    }

    fn remove_child(&mut self, child: ViewId) {
        self.children.borrow_mut().retain(|c| *c != child);
    }

    fn has_child(&self, child: ViewId) -> bool {
        self.children.borrow().contains(&child)
    }

    fn child_count(&self) -> usize {
        self.children.borrow().len()
    }
}

pub struct MockRoot {
    visibility: Rc<Cell<Visibility>>,
    backgrounds: Rc<RefCell<Vec<Background>>>,
}

impl OverlayRoot for MockRoot {
    fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility.set(visibility);
    }

    fn set_background(&mut self, background: Background) {
        self.backgrounds.borrow_mut().push(background);
    }
}

pub struct MockController {
    env: MockEnv,
}

impl SecurityController for MockController {
    fn set_credential_utils(&mut self, _utils: Rc<dyn CredentialUtils>) {
        self.env.record("wire_credentials");
    }

    fn set_mediator_callback(&mut self, _callback: Rc<dyn ViewMediatorCallback>) {
        self.env.record("wire_mediator");
    }

    fn show(&mut self) {
        self.env.record("show");
    }

    fn on_resume(&mut self) {
        self.env.record("resume");
    }

    fn on_pause(&mut self) {
        self.env.record("pause");
    }

    fn request_focus(&mut self) {
        self.env.record("focus");
    }

    fn dismiss(&mut self) -> bool {
        self.env.record("dismiss");
        self.env.dismiss_succeeds.get()
    }

    fn start_appear_animation(&mut self) {
        self.env.record("appear");
    }

    fn start_disappear_animation(&mut self, on_finished: Option<FinishedCallback>) {
        self.env.record("disappear");
        *self.env.pending_disappear.borrow_mut() = on_finished;
    }

    fn security_mode(&self) -> SecurityMode {
        self.env.mode.get()
    }

    fn handle_back_key(&mut self) -> bool {
        self.env.record("back");
        self.env.back_handled.get()
    }

    fn handle_menu_key(&mut self) -> bool {
        self.env.record("menu");
        self.env.menu_handled.get()
    }

    fn intercept_media_key(&mut self, event: &KeyEvent) -> bool {
        self.env.record(match event.action {
            KeyAction::Down => "media_down",
            KeyAction::Up => "media_up",
        });
        self.env.media_handled.get()
    }

    fn user_activity_timeout_ms(&self) -> i64 {
        self.env.timeout_ms.get()
    }

    fn clean_up(&mut self) {
        self.env.record("clean_up");
    }

    fn set_on_dismiss_action(&mut self, action: Option<DismissAction>) {
        self.env.record(if action.is_some() {
            "set_dismiss_action"
        } else {
            "clear_dismiss_action"
        });
        *self.env.dismiss_action.borrow_mut() = action;
    }
}
