mod helpers;

mod catalog_test;
mod onboarding_test;
mod progress_test;
mod router_test;
