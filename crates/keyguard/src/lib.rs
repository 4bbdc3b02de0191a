//! Top-level facade crate for keyguard.
//!
//! Re-exports core types and the ruler library so users can depend on a single crate.

pub mod core {
    pub use keyguard_core::*;
}

pub mod ruler {
    pub use keyguard_ruler::*;
}
