//! Domain records - opaque values passed through from the backend.

mod notification;
mod profile;
mod question;
mod referral;
mod stats;

pub use notification::NotificationTarget;
pub use profile::Profile;
pub use question::{OPTIONS_PER_QUESTION, QuizQuestion};
pub use referral::UserReferral;
pub use stats::{DeletedCount, PurchaseCount, ReferredCountByDate};
