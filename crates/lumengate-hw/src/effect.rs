//! Effect controller: fire-and-forget commands against the local
//! lighting-playback service.

use std::process::Command;

/// A command that can start or stop a named effect.
///
/// Both calls are fire-and-forget: the playback service offers no
/// feedback channel, so no return value exists to inspect. Controller
/// faults must never take down the session loop.
pub trait EffectController {
    /// Starts the named effect.
    fn start(&mut self, effect: &str);

    /// Stops the named effect.
    fn stop(&mut self, effect: &str);
}

// Implement EffectController for &mut T, so a caller can lend a
// controller to the session and inspect it afterwards.
impl<T: EffectController + ?Sized> EffectController for &mut T {
    fn start(&mut self, effect: &str) {
        (**self).start(effect);
    }

    fn stop(&mut self, effect: &str) {
        (**self).stop(effect);
    }
}

/// Shells out to the FPP playback binary: `fpp -e <effect>,1,1` to
/// start, `fpp -E <effect>` to stop.
#[derive(Debug)]
pub struct FppController {
    program: String,
}

impl FppController {
    /// Controller invoking the `fpp` binary on PATH.
    pub fn new() -> Self {
        Self::with_program("fpp")
    }

    /// Controller invoking an alternate binary (tests, staging rigs).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, flag: &str, arg: &str) {
        match Command::new(&self.program).arg(flag).arg(arg).status() {
            Ok(status) => {
                tracing::debug!(program = %self.program, flag, arg, %status, "Effect command");
            }
            Err(e) => {
                tracing::warn!(program = %self.program, flag, arg, error = %e, "Effect command failed to spawn");
            }
        }
    }
}

impl Default for FppController {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectController for FppController {
    fn start(&mut self, effect: &str) {
        self.run("-e", &format!("{effect},1,1"));
    }

    fn stop(&mut self, effect: &str) {
        self.run("-E", effect);
    }
}

/// A start or stop command, as observed by [`RecordingController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectCommand {
    /// `start(effect)` was issued.
    Start(String),
    /// `stop(effect)` was issued.
    Stop(String),
}

/// Records every command instead of issuing it. Test double for the
/// session loop's ordering and cleanup properties.
#[derive(Debug, Default)]
pub struct RecordingController {
    commands: Vec<EffectCommand>,
}

impl RecordingController {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command issued so far, in order.
    pub fn commands(&self) -> &[EffectCommand] {
        &self.commands
    }
}

impl EffectController for RecordingController {
    fn start(&mut self, effect: &str) {
        self.commands.push(EffectCommand::Start(effect.to_string()));
    }

    fn stop(&mut self, effect: &str) {
        self.commands.push(EffectCommand::Stop(effect.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_controller_orders_commands() {
        let mut controller = RecordingController::new();
        controller.start("blue");
        controller.stop("blue");
        controller.start("red");
        assert_eq!(
            controller.commands(),
            &[
                EffectCommand::Start("blue".to_string()),
                EffectCommand::Stop("blue".to_string()),
                EffectCommand::Start("red".to_string()),
            ]
        );
    }

    #[test]
    fn test_fpp_controller_swallows_spawn_failure() {
        // A nonexistent binary must not panic or error out.
        let mut controller = FppController::with_program("definitely-not-a-real-binary");
        controller.start("blue");
        controller.stop("blue");
    }
}
