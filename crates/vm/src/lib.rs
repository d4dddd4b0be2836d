//! stepvm executor: runs compiled programs one reversible step at a time.
//!
//! The executor owns:
//! - a fixed-size [`Memory`] whose writes are recorded per step as a
//!   [`Commit`]
//! - an append-only history of [`HistoryItem`]s and a cursor into it
//! - a list of observers notified with a [`Snapshot`] after every change
//!
//! # Usage
//!
//! ```
//! use stepvm_common::{Opcode, Program, Statement};
//! use stepvm_vm::{Executor, MemoryConfig};
//!
//! let program = Program::new(vec![
//!     Statement::new(Opcode::SetC, &[0, 5]).unwrap(),
//!     Statement::new(Opcode::AddC, &[0, 3, 1]).unwrap(),
//! ]);
//!
//! let mut exec = Executor::new(MemoryConfig::default()).unwrap();
//! exec.load_program(program);
//! exec.run(100);
//! assert_eq!(exec.memory()[1], 8);
//!
//! exec.step_back();
//! assert_eq!(exec.memory()[1], 0);
//! assert_eq!(exec.counter(), 1);
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod memory;
pub mod observer;

pub use config::MemoryConfig;
pub use error::ConfigError;
pub use executor::{Executor, RunOutcome, Step};
pub use history::HistoryItem;
pub use memory::{AccessStatistic, Commit, Memory, WriteRecord};
pub use observer::{Listener, Snapshot, SubscriptionId};
