//! # Events Module
//!
//! Progress reporting decoupled from presentation.
//!
//! The renamer emits one event per decision it makes. The CLI turns them
//! into progress lines; tests and other front ends can collect them.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Rename(RenameEvent::Renamed { from, to, .. }) = event {
//!             println!("{} -> {}", from.display(), to.display());
//!         }
//!     }
//! });
//!
//! let report = renamer.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
