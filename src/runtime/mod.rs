mod scheduler;
mod timing;

pub use scheduler::FrameScheduler;
pub use timing::{Debounce, IntervalTimer};
