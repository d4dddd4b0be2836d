//! The reversible stepping executor.
//!
//! Every forward step at the frontier runs one statement inside a memory
//! transaction and appends the resulting commit to the history. Stepping back
//! undoes that commit; stepping forward again before the frontier redoes it.
//! Recorded steps are never recomputed.

use std::fmt;

use stepvm_common::{Flow, Program};
use tracing::{debug, trace};

use crate::config::MemoryConfig;
use crate::error::ConfigError;
use crate::history::HistoryItem;
use crate::memory::{AccessStatistic, Memory};
use crate::observer::{Listener, Observers, Snapshot, SubscriptionId};

/// Result of a single [`Executor::step_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A new statement ran and was appended to the history.
    Executed,
    /// A recorded step was reapplied from its commit.
    Replayed,
    /// Nothing to do: the counter is not a valid statement index.
    Halted,
}

/// Result of [`Executor::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Steps taken, executed or replayed.
    pub steps: usize,
    /// Whether the executor ended in the halted state.
    pub halted: bool,
}

/// Owns memory, program and history, and moves through the trace.
pub struct Executor {
    config: MemoryConfig,
    memory: Memory,
    program: Program,
    counter: i32,
    history: Vec<HistoryItem>,
    cursor: usize,
    input: Vec<i32>,
    observers: Observers,
}

impl Executor {
    /// Create an executor with no program loaded.
    pub fn new(config: MemoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: MemoryConfig) -> Self {
        Self {
            memory: Memory::new(config.size),
            config,
            program: Program::default(),
            counter: 0,
            history: Vec::new(),
            cursor: 0,
            input: Vec::new(),
            observers: Observers::default(),
        }
    }

    /// Replace the program and reset all execution state.
    pub fn load_program(&mut self, program: Program) {
        debug!(statements = program.len(), "loading program");
        self.program = program;
        self.reset_execution();
        self.notify();
    }

    /// Store external input and, if nothing has run yet, place it in the
    /// input range. Values beyond the range length are dropped.
    ///
    /// Once a step is recorded the loaded memory is left alone so the
    /// recorded trace stays reproducible; the new input takes effect on the
    /// next [`clear`](Self::clear) or [`load_program`](Self::load_program).
    pub fn set_input(&mut self, values: impl Into<Vec<i32>>) {
        self.input = values.into();
        if self.history.is_empty() {
            self.load_input();
            self.notify();
        } else {
            debug!(len = self.input.len(), "input deferred until reset");
        }
    }

    /// [`set_input`](Self::set_input) with the code points of `text`.
    pub fn set_input_text(&mut self, text: &str) {
        let codes: Vec<i32> = text.chars().map(|c| u32::from(c) as i32).collect();
        self.set_input(codes);
    }

    /// Move one step forward.
    pub fn step_in(&mut self) -> Step {
        if self.cursor < self.history.len() {
            let item = &self.history[self.cursor];
            self.memory.redo(&item.commit);
            self.counter = item.counter_after;
            self.cursor += 1;
            trace!(cursor = self.cursor, counter = self.counter, "step replayed");
            self.notify();
            return Step::Replayed;
        }

        let Some(&statement) = self.program.get(self.counter) else {
            return Step::Halted;
        };

        let mut flow = Flow::Advance;
        let (commit, stat) = self.memory.mutate(|tx| flow = statement.operate(tx));
        let next = match flow {
            Flow::Advance => self.counter.saturating_add(1),
            Flow::Jump(target) => target,
        };

        trace!(
            counter = self.counter,
            next,
            statement = %statement,
            writes = commit.len(),
            "step executed"
        );
        if !stat.out_of_bound.is_empty() {
            debug!(
                counter = self.counter,
                addresses = ?stat.out_of_bound,
                "out-of-bounds access neutralized"
            );
        }

        self.history.push(HistoryItem {
            statement,
            counter_before: self.counter,
            counter_after: next,
            commit,
            stat,
        });
        self.counter = next;
        self.cursor += 1;
        self.notify();
        Step::Executed
    }

    /// Move one step back. Returns `false` at the start of the trace.
    pub fn step_back(&mut self) -> bool {
        let Some(index) = self.cursor.checked_sub(1) else {
            return false;
        };
        let item = &self.history[index];
        self.memory.undo(&item.commit);
        self.counter = item.counter_before;
        self.cursor = index;
        trace!(cursor = self.cursor, counter = self.counter, "stepped back");
        self.notify();
        true
    }

    /// Step back to the start of the trace. Returns the number of steps undone.
    pub fn rewind(&mut self) -> usize {
        let mut steps = 0;
        while self.step_back() {
            steps += 1;
        }
        steps
    }

    /// Step forward until halted or `max_steps` steps were taken.
    pub fn run(&mut self, max_steps: usize) -> RunOutcome {
        let mut steps = 0;
        while steps < max_steps {
            if self.step_in() == Step::Halted {
                break;
            }
            steps += 1;
        }
        let outcome = RunOutcome {
            steps,
            halted: self.is_halted(),
        };
        debug!(steps, halted = outcome.halted, "run finished");
        outcome
    }

    /// Discard the trace and reset memory, keeping the program.
    pub fn clear(&mut self) {
        debug!(history = self.history.len(), "clearing execution");
        self.reset_execution();
        self.notify();
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot<'_>) + 'static) -> SubscriptionId {
        let listener: Listener = Box::new(listener);
        self.observers.subscribe(listener)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            memory: self.memory.data(),
            program: &self.program,
            counter: self.counter,
            history: &self.history,
            cursor: self.cursor,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn memory(&self) -> &[i32] {
        self.memory.data()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn counter(&self) -> i32 {
        self.counter
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pending external input, as last passed to `set_input`.
    pub fn input(&self) -> &[i32] {
        &self.input
    }

    pub fn is_halted(&self) -> bool {
        self.program.get(self.counter).is_none()
    }

    pub fn can_step_back(&self) -> bool {
        self.cursor > 0
    }

    /// Access statistic of the step that produced the current state.
    pub fn last_step(&self) -> Option<&AccessStatistic> {
        self.snapshot().last_step().map(|item| &item.stat)
    }

    /// Current contents of the output range.
    pub fn output(&self) -> &[i32] {
        self.memory
            .data()
            .get(self.config.output.clone())
            .unwrap_or_default()
    }

    /// The output range rendered as characters. Values that are not Unicode
    /// scalar values render as U+FFFD.
    pub fn output_text(&self) -> String {
        self.output()
            .iter()
            .map(|&v| {
                u32::try_from(v)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect()
    }

    fn reset_execution(&mut self) {
        self.memory.reset();
        self.load_input();
        self.history.clear();
        self.cursor = 0;
        self.counter = 0;
    }

    fn load_input(&mut self) {
        let mut codes = vec![0; self.config.input.len()];
        let n = codes.len().min(self.input.len());
        codes[..n].copy_from_slice(&self.input[..n]);
        self.memory.load(self.config.input.start, &codes);
    }

    fn notify(&mut self) {
        let snapshot = Snapshot {
            memory: self.memory.data(),
            program: &self.program,
            counter: self.counter,
            history: &self.history,
            cursor: self.cursor,
        };
        self.observers.notify(&snapshot);
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::with_valid_config(MemoryConfig::default())
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .field("statements", &self.program.len())
            .field("counter", &self.counter)
            .field("cursor", &self.cursor)
            .field("history", &self.history.len())
            .field("listeners", &self.observers.len())
            .finish_non_exhaustive()
    }
}
