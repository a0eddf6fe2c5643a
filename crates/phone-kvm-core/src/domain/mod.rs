//! Domain types for Phone-KVM.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is the **domain**.  Domain code has **no** imports from network
//! libraries, HTTP clients, image codecs, or async runtimes, and can be tested
//! on any machine without a KVM appliance or a phone attached.
//!
//! Here the domain answers questions like "which calls make up a swipe, and
//! when is each one due?" and "which URL scheme opens WeChat?".  The agent's
//! application layer asks these questions; its infrastructure layer performs
//! the resulting HTTP calls.

pub mod apps;
pub mod gesture;
pub mod pacing;
pub mod screenshot;
