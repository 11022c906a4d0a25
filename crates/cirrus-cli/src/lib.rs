//! Cirrus CLI
//!
//! Thin command layer over `cirrus-pipeline`: load the app manifest, then
//! check it, synthesize the cloud assembly, or print one environment's
//! deployment template.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod logging;
