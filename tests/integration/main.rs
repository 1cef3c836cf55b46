//! Postgres integration tests
//!
//! Need a live database; run with:
//! `DATABASE_URL=postgres://... cargo test -- --ignored`

mod pg_tests;
