//! Step-at-a-time playback
//!
//! [`Player`] owns the incremental [`ReplayState`] and walks
//! `Init -> ShowingStep(0) -> ... -> Finished`. Input arrives through a
//! [`StepInput`] and a shared [`CancelToken`] can stop playback at any
//! wait boundary. The token can be wired to SIGINT/SIGTERM with
//! [`CancelToken::register_signals`].

use super::counters::Counters;
use super::narrate::{self, Before, Narration};
use super::state::ReplayState;
use crate::trace::Trace;
use signal_hook::consts::{SIGINT, SIGTERM};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Init,
    ShowingStep(usize),
    Finished,
    Cancelled,
}

impl PlayerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PlayerState::Finished | PlayerState::Cancelled)
    }
}

/// Shared interrupt flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise this token on SIGINT or SIGTERM instead of terminating, so the
    /// caller can restore the terminal before exiting.
    pub fn register_signals(&self) -> io::Result<()> {
        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&self.0))?;
        }
        Ok(())
    }
}

/// What the user asked for while the player waited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Advance,
    Cancel,
}

/// Blocking source of player input. Implementations that can block for long
/// should return [`Input::Cancel`] once the player's token is raised.
pub trait StepInput {
    fn wait(&mut self) -> io::Result<Input>;
}

pub struct Player {
    trace: Trace,
    state: PlayerState,
    replay: ReplayState,
    counters: Counters,
    narration: Narration,
    cancel: CancelToken,
}

impl Player {
    pub fn new(trace: Trace) -> Self {
        Self::with_cancel(trace, CancelToken::new())
    }

    pub fn with_cancel(trace: Trace, cancel: CancelToken) -> Self {
        let replay = ReplayState::new(trace.subject());
        let narration = narrate::overview(trace.kind());
        Self {
            trace,
            state: PlayerState::Init,
            replay,
            counters: Counters::default(),
            narration,
            cancel,
        }
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn replay(&self) -> &ReplayState {
        &self.replay
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn narration(&self) -> &Narration {
        &self.narration
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Move one state forward. Terminal states are sticky.
    pub fn advance(&mut self) -> PlayerState {
        if self.cancel.is_cancelled() {
            self.state = PlayerState::Cancelled;
            return self.state;
        }
        let next = match self.state {
            PlayerState::Init => 0,
            PlayerState::ShowingStep(i) => i + 1,
            terminal => return terminal,
        };
        match self.trace.get(next).cloned() {
            Some(event) => {
                let before = Before::capture(&self.replay, &event);
                if self.replay.apply(&event) {
                    self.counters.record(self.trace.kind(), &event);
                    self.narration = narrate::narrate(&before, &self.counters, &event);
                } else {
                    self.narration = narrate::skipped(&event);
                }
                self.state = PlayerState::ShowingStep(next);
            }
            None => {
                self.narration = narrate::summary(&self.replay, &self.counters);
                self.state = PlayerState::Finished;
            }
        }
        self.state
    }

    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.state = PlayerState::Cancelled;
    }

    /// Drive playback until a terminal state. `show` runs once per state,
    /// including the terminal one; the player waits for one more input after
    /// `Finished` is shown so the summary stays visible.
    pub fn run<I, F>(&mut self, input: &mut I, mut show: F) -> io::Result<PlayerState>
    where
        I: StepInput,
        F: FnMut(&Player) -> io::Result<()>,
    {
        loop {
            if self.cancel.is_cancelled() {
                self.state = PlayerState::Cancelled;
                return Ok(self.state);
            }
            show(self)?;
            if self.cancel.is_cancelled() {
                self.state = PlayerState::Cancelled;
                return Ok(self.state);
            }
            let pressed = input.wait()?;
            if pressed == Input::Cancel || self.cancel.is_cancelled() {
                self.cancel();
                return Ok(self.state);
            }
            if self.state == PlayerState::Finished {
                return Ok(self.state);
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_source;
    use crate::replay::reconstruct;

    struct Scripted(Vec<Input>);

    impl StepInput for Scripted {
        fn wait(&mut self) -> io::Result<Input> {
            Ok(if self.0.is_empty() {
                Input::Advance
            } else {
                self.0.remove(0)
            })
        }
    }

    fn player(source: &str) -> Player {
        Player::new(compile_source(source).expect("compiles"))
    }

    #[test]
    fn test_state_sequence() {
        let mut p = player("array a = [2, 1];\nbubble_sort(a);");
        let len = p.trace().len();
        assert_eq!(p.state(), PlayerState::Init);
        for i in 0..len {
            assert_eq!(p.advance(), PlayerState::ShowingStep(i));
        }
        assert_eq!(p.advance(), PlayerState::Finished);
        assert_eq!(p.advance(), PlayerState::Finished);
        assert_eq!(p.replay().array, vec![1, 2]);
    }

    #[test]
    fn test_empty_trace_goes_straight_to_finished() {
        let mut p = player("stack.pop();");
        assert!(p.trace().is_empty());
        assert_eq!(p.advance(), PlayerState::Finished);
        assert_eq!(p.counters(), &Counters::default());
    }

    #[test]
    fn test_incremental_matches_reconstruct() {
        let mut p = player("array a = [5, 3, 8, 4, 2];\nquick_sort(a);");
        while let PlayerState::ShowingStep(i) = p.advance() {
            assert_eq!(p.replay(), &reconstruct(p.trace(), i + 1));
        }
        assert_eq!(p.state(), PlayerState::Finished);
    }

    #[test]
    fn test_cancel_stops_remaining_events() {
        let mut p = player("array a = [5, 3, 8, 4, 2];\nbubble_sort(a);");
        let mut input = Scripted(vec![Input::Advance, Input::Advance, Input::Cancel]);
        let mut shown = 0;
        let end = p
            .run(&mut input, |_| {
                shown += 1;
                Ok(())
            })
            .expect("runs");
        assert_eq!(end, PlayerState::Cancelled);
        assert_eq!(shown, 3);
        assert_eq!(p.replay().position(), 2);
    }

    #[test]
    fn test_cancel_token_checked_after_wait() {
        let mut p = player("");
        let token = p.cancel_token();
        struct Interrupting(CancelToken);
        impl StepInput for Interrupting {
            fn wait(&mut self) -> io::Result<Input> {
                self.0.cancel();
                Ok(Input::Advance)
            }
        }
        let end = p.run(&mut Interrupting(token), |_| Ok(())).expect("runs");
        assert_eq!(end, PlayerState::Cancelled);
        assert_eq!(p.replay().position(), 0);
    }

    #[test]
    fn test_cancel_during_show_skips_wait() {
        let mut p = player("array a = [2, 1];\nbubble_sort(a);");
        let token = p.cancel_token();
        let mut input = Scripted(Vec::new());
        let mut shown = 0;
        let end = p
            .run(&mut input, |_| {
                shown += 1;
                if shown == 2 {
                    token.cancel();
                }
                Ok(())
            })
            .expect("runs");
        assert_eq!(end, PlayerState::Cancelled);
        assert_eq!(shown, 2);
        assert_eq!(p.replay().position(), 1);
    }

    #[test]
    fn test_sigterm_raises_token() {
        let token = CancelToken::new();
        token.register_signals().expect("handlers installed");
        assert!(!token.is_cancelled());
        signal_hook::low_level::raise(SIGTERM).expect("raise");
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_run_to_completion_shows_summary() {
        let mut p = player("stack.push(4);\nstack.push(9);\nstack.pop();");
        let end = p.run(&mut Scripted(Vec::new()), |_| Ok(())).expect("runs");
        assert_eq!(end, PlayerState::Finished);
        assert!(p.narration().title.starts_with("Final Stack State"));
        assert_eq!(p.counters().pushes, 2);
        assert_eq!(p.counters().pops, 1);
    }
}
