pub mod filter;
pub mod composer;
pub mod handler;

pub use filter::{is_eligible, SkipReason};
pub use composer::ReplyComposer;
pub use handler::{EventPipeline, HandleOutcome};
