pub mod calendar;
pub mod time_frame;

pub use time_frame::TimeFrame;
