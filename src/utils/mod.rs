pub mod error;
pub mod html;
pub mod logger;
pub mod progress;
pub mod validation;
