//! ECS resources made available to systems.
//!
//! Overview
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – window, grid and interaction settings from the INI file
//! - `gridlayout` – the validated layout the cells were spawned from
//! - `interaction` – the pointer/click interaction controller and its state
//! - `pointer` – pointer position and on-screen flag carried across frames
//! - `tweenrng` – seeded randomness for explosion parameters
//! - `windowsize` – current window dimensions in pixels
//! - `worldtime` – simulation time and delta
pub mod debugmode;
pub mod gameconfig;
pub mod gridlayout;
pub mod interaction;
pub mod pointer;
pub mod tweenrng;
pub mod windowsize;
pub mod worldtime;
