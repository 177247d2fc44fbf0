// Round bookkeeping: which fields win, how many were scratched, Win / Lose.
// One `GameSession` per game window; observers hear about every state change.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::cell::RevealSink;
use crate::types::CellSpec;

pub const FIELD_COUNT: usize = 9;
pub const WINNING_FIELDS: usize = 3;
/// Reveals after which the round is decided.
pub const SCRATCH_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Win,
    Lose,
}

type Observer = Box<dyn FnMut(GameState)>;

pub struct GameSession {
    rng: StdRng,
    answers: Vec<bool>,
    scratched: Vec<bool>,
    scratch_count: usize,
    success_count: usize,
    state: GameState,
    observers: Vec<Observer>,
}

impl GameSession {
    /// New session with entropy-seeded randomness.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// New session whose rounds are reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let answers = generate_answers(&mut rng);
        log::debug!("answers: {answers:?}");
        Self {
            rng,
            answers,
            scratched: vec![false; FIELD_COUNT],
            scratch_count: 0,
            success_count: 0,
            state: GameState::Running,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Winning flag per field for the current round.
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    /// `CellSpec` for every field of the current round, in field order.
    pub fn cell_specs(&self) -> impl Iterator<Item = CellSpec> + '_ {
        self.answers.iter().enumerate().map(|(i, &win)| CellSpec::new(i, win))
    }

    pub fn scratch_count(&self) -> usize {
        self.scratch_count
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    /// Register a callback for state changes (called with the new state).
    pub fn subscribe(&mut self, observer: impl FnMut(GameState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// A field was revealed. Repeats for the same field and reveals after the
    /// round is decided are ignored.
    pub fn on_reveal(&mut self, index: usize, is_winning: bool) {
        if self.state != GameState::Running {
            log::debug!("reveal of field {index} after round ended ({:?}), ignored", self.state);
            return;
        }
        match self.scratched.get_mut(index) {
            Some(seen) if !*seen => *seen = true,
            Some(_) => return,
            None => {
                log::warn!("reveal for unknown field {index}");
                return;
            }
        }

        self.scratch_count += 1;
        if is_winning {
            self.success_count += 1;
        }

        if self.scratch_count >= SCRATCH_LIMIT {
            let next = if self.success_count == WINNING_FIELDS { GameState::Win } else { GameState::Lose };
            self.set_state(next);
        }
    }

    /// Start a new round: fresh answers, counters back to zero, Running.
    pub fn reset(&mut self) {
        self.answers = generate_answers(&mut self.rng);
        log::debug!("answers: {:?}", self.answers);
        self.scratched = vec![false; FIELD_COUNT];
        self.scratch_count = 0;
        self.success_count = 0;
        self.set_state(GameState::Running);
    }

    fn set_state(&mut self, next: GameState) {
        if self.state == next {
            return;
        }
        log::info!("game state {:?} -> {:?}", self.state, next);
        self.state = next;
        for observer in self.observers.iter_mut() {
            observer(next);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealSink for GameSession {
    fn on_reveal(&mut self, cell: CellSpec) {
        GameSession::on_reveal(self, cell.index, cell.is_winning);
    }
}

/// `WINNING_FIELDS` of `FIELD_COUNT` set, picked uniformly without replacement.
fn generate_answers(rng: &mut StdRng) -> Vec<bool> {
    let mut answers = vec![false; FIELD_COUNT];
    for i in index::sample(rng, FIELD_COUNT, WINNING_FIELDS) {
        answers[i] = true;
    }
    answers
}
