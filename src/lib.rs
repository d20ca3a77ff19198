//! # qrbits
//!
//! A compact QR code encoder. Payloads are encoded in byte mode, protected with
//! Reed-Solomon error correction computed in the log domain, and laid out
//! into a packed bit matrix where every row is `stride` bytes and a set bit is
//! a dark module.
//!
//! ## Quick Start
//!
//! ```rust
//! use qrbits::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Smallest fitting version at the default ec level M, lowest penalty mask
//! let symbol = QRBuilder::new(b"Hello, World!").build()?;
//!
//! assert_eq!(*symbol.version(), 1);
//! println!("{}", symbol.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrbits::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new(b"Hello, World!")
//!     .version(Version::new(3)?)      // Longer payloads are truncated to fit
//!     .ec_level(ECLevel::H)           // Defaults to ECLevel::M
//!     .mask(MaskPattern::new(5)?)     // Defaults to the lowest penalty mask
//!     .build()?;
//!
//! let img = symbol.to_image(4);
//! assert_eq!(img.width(), (29 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Bounded Memory
//!
//! Every buffer of an encode can come from a caller supplied [`Arena`]. See
//! [`Arena::required_size`] for sizing it.
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

pub mod builder;
pub(crate) mod common;
mod render;
mod symbol;

pub use builder::{encode, QRBuilder};
pub use common::arena::Arena;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
pub use symbol::Symbol;
