//! The host-facing controller: input in, render instructions out.
//!
//! ```text
//! key / button / touch ──► Action ──► Reveal::dispatch ──► Outcome
//!                                         │
//!                                         └─► RevealSession (tiles)
//!                                             ImageCursor   (which image)
//!                                             Settings      (active + staged)
//! ```
//!
//! The host keeps one `Reveal` per window and passes it by `&mut` to its
//! handlers. Nothing here is global.

use log::{debug, info};
use serde::Serialize;

use crate::action::Action;
use crate::covering::{Covering, CoveringRequest};
use crate::error::Result;
use crate::gesture::GestureState;
use crate::navigation::ImageCursor;
use crate::session::{Redraw, RevealSession, RevealState};
use crate::settings::Settings;

/// What the host should do after an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    /// Repaint tiles.
    Redraw(Redraw),
    /// Show image `index` of `total`, then request a covering for it.
    ShowImage { index: usize, total: usize },
    /// No images are available; show an example image instead.
    ShowExample,
    /// Settings changed. `regenerate` when the covering must be rebuilt.
    SettingsChanged { regenerate: bool },
    /// Nothing for the core to do; the host handles this one itself.
    Host(Action),
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct Reveal {
    session: RevealSession,
    images: ImageCursor,
    settings: Settings,
    /// Edited but not yet committed settings.
    staged: Option<Settings>,
}

impl Reveal {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: settings.sanitized(),
            ..Self::default()
        }
    }

    pub fn session(&self) -> &RevealSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn images(&self) -> &ImageCursor {
        &self.images
    }

    /// Settings waiting for `CommitSettings`, if any.
    pub fn staged(&self) -> Option<&Settings> {
        self.staged.as_ref()
    }

    pub fn state(&self) -> RevealState {
        self.session.state()
    }

    /// The host found `total` images. Start at the first one.
    pub fn set_images(&mut self, total: usize) -> Outcome {
        self.images.reset(total);
        info!("{total} images available");
        if total == 0 {
            Outcome::ShowExample
        } else {
            Outcome::ShowImage { index: 0, total }
        }
    }

    /// Covering request for the current image under the active settings.
    pub fn covering_request(&self, width: f64, height: f64) -> CoveringRequest {
        self.settings.covering_request(width, height)
    }

    /// Install a freshly generated covering.
    pub fn load_covering(&mut self, covering: Covering) -> Redraw {
        self.session.load(covering)
    }

    /// Install the result of a generation attempt. On error the current
    /// tiles stay exactly as they were.
    pub fn apply(&mut self, generated: Result<Covering>) -> Result<Redraw> {
        generated.map(|covering| self.load_covering(covering))
    }

    /// Remember edited settings until `CommitSettings`.
    pub fn stage_settings(&mut self, settings: Settings) {
        self.staged = Some(settings);
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        debug!("dispatch {action}");
        match action {
            Action::Uncover => Outcome::Redraw(self.session.uncover_next()),
            Action::Reset => Outcome::Redraw(self.session.cover_full()),
            Action::Clear => Outcome::Redraw(self.session.uncover_full()),
            Action::Next => self.step_image(1),
            Action::Previous => self.step_image(-1),
            Action::CommitSettings => match self.staged.take() {
                Some(staged) => self.replace_settings(staged),
                None => Outcome::Ignored,
            },
            Action::ResetSettings => {
                self.staged = None;
                self.replace_settings(Settings::default())
            }
            Action::Info | Action::Load | Action::OpenSettings => Outcome::Host(action),
        }
    }

    /// Keyboard input; `None` for keys without a binding.
    pub fn handle_key(&mut self, key: &str) -> Option<Outcome> {
        Action::from_key(key).map(|action| self.dispatch(action))
    }

    /// A finished touch sequence; `None` when it was suppressed.
    pub fn handle_gesture(&mut self, gesture: &GestureState) -> Option<Outcome> {
        gesture
            .classify(self.settings.swipe_threshold)
            .map(|action| self.dispatch(action))
    }

    fn step_image(&mut self, delta: isize) -> Outcome {
        match self.images.step(delta) {
            Some((index, total)) => Outcome::ShowImage { index, total },
            None => Outcome::ShowExample,
        }
    }

    fn replace_settings(&mut self, settings: Settings) -> Outcome {
        let settings = settings.sanitized();
        let regenerate = self.settings.covering_differs(&settings);
        self.settings = settings;
        Outcome::SettingsChanged { regenerate }
    }
}
