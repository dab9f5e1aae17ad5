pub mod contact;
pub mod onboarding;
pub mod submissions;
