use std::time::{Duration, Instant};

use log::debug;

use super::Cmd;

/// Window inside which a second activation on the same word counts as a double one
pub const DEFAULT_DOUBLE_ACTIVATION_WINDOW: Duration = Duration::from_millis(250);

/// A word addressed by chunk index and word index within that chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordTarget {
    pub chunk: usize,
    pub word: usize,
}

impl WordTarget {
    pub fn new(chunk: usize, word: usize) -> Self {
        Self { chunk, word }
    }
}

/// What a settled activation means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Single activation
    Split(WordTarget),
    /// Double activation
    ToggleVerb(WordTarget),
}

impl Resolution {
    pub fn target(&self) -> WordTarget {
        match *self {
            Resolution::Split(target) | Resolution::ToggleVerb(target) => target,
        }
    }

    pub fn into_cmd(self) -> Cmd {
        match self {
            Resolution::Split(WordTarget { chunk, word }) => Cmd::Split { chunk, word },
            Resolution::ToggleVerb(WordTarget { chunk, word }) => Cmd::ToggleVerb { chunk, word },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    PendingSplit { target: WordTarget, deadline: Instant },
}

/// Tells a single activation of a word from a double one.
///
/// A first activation is held as a pending split. A second activation on the
/// same word before the deadline turns it into an emphasis toggle; anything
/// else settles it as a split. The caller supplies the clock, so the resolver
/// never sleeps or spawns timers: drive it with [`poll`](Self::poll) from the
/// event loop, using [`deadline`](Self::deadline) as the wait timeout.
///
/// Targets are only valid for the sequence they were taken from. A settled
/// split changes chunk indices, so an activation that settles one is not
/// armed: apply the split, address the word again, and activate once more.
#[derive(Debug, Clone)]
pub struct ClickResolver {
    window: Duration,
    state: State,
}

impl Default for ClickResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_ACTIVATION_WINDOW)
    }
}

impl ClickResolver {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: State::Idle,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Register an activation at `now`.
    ///
    /// From idle, `target` becomes pending and `None` is returned. With an
    /// activation pending, a same-target activation inside the window yields
    /// `ToggleVerb`; any other yields `Split` for the pending word. Either way
    /// the resolver is left idle and `target` is not armed, since its indices
    /// predate the settled edit.
    pub fn activate(&mut self, target: WordTarget, now: Instant) -> Option<Resolution> {
        match self.state {
            State::PendingSplit {
                target: pending,
                deadline: pending_deadline,
            } if pending == target && now < pending_deadline => {
                self.state = State::Idle;
                debug!("double activation on {target:?}");
                Some(Resolution::ToggleVerb(target))
            }
            State::PendingSplit {
                target: pending, ..
            } => {
                self.state = State::Idle;
                debug!("activation on {target:?} settles pending split on {pending:?}");
                Some(Resolution::Split(pending))
            }
            State::Idle => {
                self.state = State::PendingSplit {
                    target,
                    deadline: now + self.window,
                };
                None
            }
        }
    }

    /// Settle a pending activation whose window has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Resolution> {
        match self.state {
            State::PendingSplit { target, deadline } if now >= deadline => {
                self.state = State::Idle;
                Some(Resolution::Split(target))
            }
            _ => None,
        }
    }

    /// Settle a pending activation as a split right away.
    pub fn flush(&mut self) -> Option<Resolution> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::PendingSplit { target, .. } => Some(Resolution::Split(target)),
            State::Idle => None,
        }
    }

    /// Drop a pending activation without resolving it. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = State::Idle;
        was_pending
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::PendingSplit { .. })
    }

    /// The word whose activation is waiting to settle
    pub fn pending(&self) -> Option<WordTarget> {
        match self.state {
            State::PendingSplit { target, .. } => Some(target),
            State::Idle => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            State::PendingSplit { deadline, .. } => Some(deadline),
            State::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WINDOW: Duration = Duration::from_millis(250);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn single_activation_resolves_to_split_after_window() {
        let t0 = Instant::now();
        let mut resolver = ClickResolver::new(WINDOW);
        let fox = WordTarget::new(0, 2);

        assert_eq!(resolver.activate(fox, t0), None);
        assert_eq!(resolver.deadline(), Some(t0 + WINDOW));
        assert_eq!(resolver.pending(), Some(fox));
        assert_eq!(resolver.poll(t0 + ms(100)), None);
        assert!(resolver.is_pending());

        assert_eq!(resolver.poll(t0 + WINDOW), Some(Resolution::Split(fox)));
        assert!(!resolver.is_pending());
        assert_eq!(resolver.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn double_activation_resolves_to_toggle_only() {
        let t0 = Instant::now();
        let mut resolver = ClickResolver::new(WINDOW);
        let over = WordTarget::new(1, 1);

        resolver.activate(over, t0);
        assert_eq!(
            resolver.activate(over, t0 + ms(120)),
            Some(Resolution::ToggleVerb(over))
        );
        // the pending split is gone for good
        assert_eq!(resolver.poll(t0 + ms(1000)), None);
        assert_eq!(resolver.deadline(), None);
    }

    #[test]
    fn activation_on_other_word_settles_pending_as_split() {
        let t0 = Instant::now();
        let mut resolver = ClickResolver::new(WINDOW);
        let first = WordTarget::new(0, 1);
        let second = WordTarget::new(1, 3);

        resolver.activate(first, t0);
        assert_eq!(
            resolver.activate(second, t0 + ms(50)),
            Some(Resolution::Split(first))
        );
        // the second word is not armed with indices from before the split
        assert!(!resolver.is_pending());
        assert_eq!(resolver.poll(t0 + ms(300)), None);

        // re-addressed after the split, it arms normally
        let moved = WordTarget::new(2, 3);
        assert_eq!(resolver.activate(moved, t0 + ms(50)), None);
        assert_eq!(resolver.deadline(), Some(t0 + ms(50) + WINDOW));
        assert_eq!(resolver.poll(t0 + ms(300)), Some(Resolution::Split(moved)));
    }

    #[test]
    fn late_second_activation_is_two_singles() {
        let t0 = Instant::now();
        let mut resolver = ClickResolver::new(WINDOW);
        let word = WordTarget::new(0, 1);

        resolver.activate(word, t0);
        // nobody polled in time
        assert_eq!(
            resolver.activate(word, t0 + ms(400)),
            Some(Resolution::Split(word))
        );
        assert!(!resolver.is_pending());
        assert_eq!(resolver.activate(word, t0 + ms(400)), None);
        assert_eq!(resolver.poll(t0 + ms(650)), Some(Resolution::Split(word)));
    }

    #[test]
    fn flush_and_cancel() {
        let t0 = Instant::now();
        let mut resolver = ClickResolver::default();
        let word = WordTarget::new(2, 0);

        resolver.activate(word, t0);
        assert_eq!(resolver.flush(), Some(Resolution::Split(word)));
        assert_eq!(resolver.flush(), None);

        resolver.activate(word, t0);
        assert!(resolver.cancel());
        assert!(!resolver.cancel());
        assert_eq!(resolver.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn default_window_is_250ms() {
        assert_eq!(ClickResolver::default().window(), ms(250));
    }

    #[test]
    fn resolutions_map_to_commands() {
        let target = WordTarget::new(1, 2);
        assert_eq!(
            Resolution::Split(target).into_cmd(),
            Cmd::Split { chunk: 1, word: 2 }
        );
        assert_eq!(
            Resolution::ToggleVerb(target).into_cmd(),
            Cmd::ToggleVerb { chunk: 1, word: 2 }
        );
        assert_eq!(Resolution::ToggleVerb(target).target(), target);
    }
}
