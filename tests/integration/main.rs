//! In-process HTTP tests against the in-memory backend

mod common;

mod books_tests;
mod borrowing_tests;
mod magazine_tests;
mod session_tests;
