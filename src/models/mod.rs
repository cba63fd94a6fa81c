pub mod booking;
pub mod reminder;

pub use booking::{Booking, BookingStatus};
pub use reminder::{Reminder, ReminderChannel};
