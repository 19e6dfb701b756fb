mod status_tests;
mod user_tests;
