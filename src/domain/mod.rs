//! Domain types shared across Conduit.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error types** ([`ConduitError`])
//! - **Result type alias** ([`Result`])
//! - **Format tags** ([`FormatTag`], [`Direction`])
//!
//! # Error Handling
//!
//! Fatal problems travel through [`Result<T, ConduitError>`]; expected misses do not:
//!
//! ```rust
//! use conduit::domain::Result;
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = conduit::mapping::load_mapping_config("config/inbound_config.json")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod format;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::ConduitError;
pub use format::{Direction, FormatTag};
pub use result::Result;
