//! Progress reporting: a `begin_task`/`worked`/`done`/`is_canceled`
//! progress sink contract, plus sub-progress views that meter out a
//! fraction of a parent's budget.

mod null;
mod sub;
mod traits;

#[cfg(feature = "cli")]
mod terminal;

pub use null::NullProgress;
pub use sub::SubProgress;
pub use traits::ProgressTrait;

#[cfg(feature = "cli")]
pub use terminal::TerminalProgress;
