mod helpers;
mod local_test;
mod profile_test;
mod session_test;
