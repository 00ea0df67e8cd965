//! Application services (mailer, upload store).

pub mod email;
pub mod uploads;

pub use email::EmailService;
pub use uploads::UploadStore;
