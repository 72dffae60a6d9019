mod common;

mod progress_tests;
