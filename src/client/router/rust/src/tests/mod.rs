/* src/client/router/rust/src/tests/mod.rs */

mod navigation;
mod support;
