pub mod clock;

pub use clock::{Clock, RealClock, TestClock, default_clock};
