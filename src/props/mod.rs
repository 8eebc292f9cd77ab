//! Layered property sources and profile expansion.
//!
//! Properties arrive in Java-`.properties`-style files. A key may carry a
//! profile prefix (`%prod.db.url`), which scopes it to one deployment
//! profile. This module parses those files once into an explicit tagged
//! structure (base layer + per-profile overlays) and exposes expansion as a
//! pure function that flattens the structure for one active profile.

mod expand;
mod store;


pub use expand::expand;
pub use store::{PropertyLayer, RawProperties};
