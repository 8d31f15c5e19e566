//! Pointer Input Handling
//!
//! This crate tracks the cursor over the window so the application can
//! hover and click tetrahedra.

mod pointer;

pub use pointer::{to_ndc, Click, PointerTracker, CLICK_SLOP};
