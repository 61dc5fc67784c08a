//! Event types and observers used by the application.
//!
//! Submodules:
//! - [`pointer`] – pointer moved/left, cell released, window resized
//! - [`switchdebug`] – toggle the debug overlay on/off
//! - [`tween`] – timeline edge callbacks
//! - [`tweenrequest`] – animation requests from the controller to the tween systems
pub mod pointer;
pub mod switchdebug;
pub mod tween;
pub mod tweenrequest;
