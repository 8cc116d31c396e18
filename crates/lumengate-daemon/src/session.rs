//! The interactive effect session.
//!
//! A two-state machine (Idle, or Active(effect)) driven by one
//! blocking identity read per iteration: read, resolve against the
//! store, switch the effect. Stop-before-start ordering is mandatory;
//! the playback service may not run two effects concurrently. The loop
//! runs until the shutdown flag is set or the reader reaches a terminal
//! state, and the cleanup path (stop active effect, release reader)
//! runs unconditionally on every exit, error paths included.

use std::time::Duration;

use anyhow::Context;

use lumengate_auth::{enroll, AuthError, Authenticator, EnrollmentRequest};
use lumengate_hw::{EffectController, IdentityReader, ShutdownFlag};
use lumengate_store::ProfileStore;
use lumengate_types::{EffectCatalog, Scan, DEFAULT_EFFECT};

/// Consecutive reader failures tolerated before the session gives up.
const MAX_READ_FAILURES: u32 = 5;

/// Pause between failed read attempts.
const READ_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Source of operator-confirmed enrollment details after a failed
/// lookup. `Ok(None)` means enrollment was declined.
pub trait EnrollmentPrompt {
    /// Offers enrollment for the identity that just failed to match.
    fn offer(&mut self, identity: &str) -> anyhow::Result<Option<EnrollmentRequest>>;
}

impl<T: EnrollmentPrompt + ?Sized> EnrollmentPrompt for &mut T {
    fn offer(&mut self, identity: &str) -> anyhow::Result<Option<EnrollmentRequest>> {
        (**self).offer(identity)
    }
}

/// Interactive dialoguer-backed enrollment prompt. Effect selection is
/// constrained to the catalog, so the operator cannot type an
/// out-of-catalog name.
#[derive(Debug)]
pub struct InteractivePrompt {
    catalog: EffectCatalog,
}

impl InteractivePrompt {
    /// Prompt offering effects from `catalog`.
    pub fn new(catalog: EffectCatalog) -> Self {
        Self { catalog }
    }
}

impl EnrollmentPrompt for InteractivePrompt {
    fn offer(&mut self, identity: &str) -> anyhow::Result<Option<EnrollmentRequest>> {
        println!("No profile matches '{identity}'.");
        let create = dialoguer::Confirm::new()
            .with_prompt("Create a new profile?")
            .default(false)
            .interact()
            .context("enrollment confirmation failed")?;
        if !create {
            return Ok(None);
        }

        let display_name: String = dialoguer::Input::new()
            .with_prompt("Display name")
            .interact_text()
            .context("display name prompt failed")?;
        let entries = self.catalog.entries();
        let default = entries.iter().position(|e| *e == DEFAULT_EFFECT).unwrap_or(0);
        let selection = dialoguer::Select::new()
            .with_prompt("Effect")
            .items(entries)
            .default(default)
            .interact()
            .context("effect selection failed")?;

        Ok(Some(EnrollmentRequest {
            display_name: display_name.trim().to_string(),
            effect_name: entries[selection].to_string(),
        }))
    }
}

/// The session loop and its state.
pub struct Session<R, C, S, P> {
    reader: R,
    controller: C,
    store: S,
    prompt: P,
    authenticator: Authenticator,
    catalog: EffectCatalog,
    shutdown: ShutdownFlag,
    startup_sweep: bool,
    active: Option<String>,
}

impl<R, C, S, P> Session<R, C, S, P>
where
    R: IdentityReader,
    C: EffectController,
    S: ProfileStore,
    P: EnrollmentPrompt,
{
    /// Assembles a session in the Idle state.
    pub fn new(
        reader: R,
        controller: C,
        store: S,
        prompt: P,
        authenticator: Authenticator,
        catalog: EffectCatalog,
        shutdown: ShutdownFlag,
    ) -> Self {
        Self {
            reader,
            controller,
            store,
            prompt,
            authenticator,
            catalog,
            shutdown,
            startup_sweep: true,
            active: None,
        }
    }

    /// Disables the initial stop-everything sweep.
    pub fn with_startup_sweep(mut self, sweep: bool) -> Self {
        self.startup_sweep = sweep;
        self
    }

    /// Runs until interrupted. Cleanup (stopping the active effect,
    /// releasing the reader) happens exactly once, on every exit path.
    pub fn run(mut self) -> anyhow::Result<()> {
        let result = self.run_loop();

        if let Some(effect) = self.active.take() {
            tracing::info!(effect = %effect, "Stopping active effect");
            self.controller.stop(&effect);
        }
        self.reader.cleanup();
        tracing::info!("Session closed");

        result
    }

    fn run_loop(&mut self) -> anyhow::Result<()> {
        if self.startup_sweep {
            // Playback may have effects left over from a previous run.
            for effect in self.catalog.entries() {
                self.controller.stop(effect);
            }
        }

        loop {
            if self.shutdown.is_set() {
                return Ok(());
            }
            let Some(scan) = self.read_with_retry()? else {
                return Ok(());
            };

            match self.authenticator.resolve(&mut self.store, &scan) {
                Ok(Some(profile)) => {
                    tracing::info!(
                        display_name = %profile.display_name,
                        effect = %profile.effect_name,
                        "Authenticated"
                    );
                    self.switch_to(&profile.effect_name);
                }
                Ok(None) => self.offer_enrollment(&scan)?,
                Err(AuthError::InvalidInput(msg)) => {
                    // A reader produced a scan the authenticator rejects;
                    // not worth crashing the session over.
                    tracing::warn!(%msg, "Rejected scan");
                }
                Err(e) => return Err(e).context("authentication failed"),
            }
        }
    }

    fn read_with_retry(&mut self) -> anyhow::Result<Option<Scan>> {
        let mut failures = 0u32;
        loop {
            if self.shutdown.is_set() {
                return Ok(None);
            }
            match self.reader.read(&self.shutdown) {
                Ok(scan) => return Ok(scan),
                Err(e) => {
                    failures += 1;
                    if failures >= MAX_READ_FAILURES {
                        return Err(e).context("identity reader failed repeatedly");
                    }
                    tracing::warn!(error = %e, attempt = failures, "Reader fault, retrying");
                    std::thread::sleep(READ_RETRY_DELAY);
                }
            }
        }
    }

    fn offer_enrollment(&mut self, scan: &Scan) -> anyhow::Result<()> {
        loop {
            let Some(request) = self.prompt.offer(&scan.identity)? else {
                tracing::debug!("Enrollment declined");
                return Ok(());
            };
            match enroll(
                self.authenticator.scheme(),
                &mut self.store,
                scan,
                &request,
                &self.catalog,
            ) {
                Ok(profile) => {
                    self.switch_to(&profile.effect_name);
                    return Ok(());
                }
                Err(AuthError::UnknownEffect(name)) => {
                    tracing::warn!(effect = %name, "Effect not in catalog, re-prompting");
                }
                Err(AuthError::InvalidInput(msg)) => {
                    tracing::warn!(%msg, "Invalid enrollment details, re-prompting");
                }
                Err(e) => return Err(e).context("enrollment failed"),
            }
        }
    }

    /// Idle → Active(e), or Active(e1) → Active(e2) with stop-before-
    /// start. Re-authenticating the active effect leaves it running.
    fn switch_to(&mut self, effect: &str) {
        if self.active.as_deref() == Some(effect) {
            tracing::debug!(effect = %effect, "Effect already active");
            return;
        }
        if let Some(old) = self.active.take() {
            self.controller.stop(&old);
        }
        self.controller.start(effect);
        self.active = Some(effect.to_string());
    }
}
