//! Multi-step authentication flow: phone check, registration, login, OTP
//! verification and password reset.

mod config;
mod controller;
mod forms;
mod state;

#[cfg(test)]
mod tests;

pub use config::{AuthFlowConfig, MIN_PASSWORD_LENGTH};
pub use controller::AuthFlowController;
pub use forms::{OtherDetailsForm, PasswordResetForm, RegisterForm, BIRTH_DATE_FORMAT};
pub use state::{next_step, AuthStep, FlowEvent};
