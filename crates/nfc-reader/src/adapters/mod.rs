//! Concrete reader backends.
//!
//! - `unavailable` - stand-in used when no driver could be opened
//! - `pcsc` - real hardware via PC/SC (feature `pcsc`)

mod unavailable;

pub use unavailable::UnavailableReader;

#[cfg(feature = "pcsc")]
mod pcsc;

#[cfg(feature = "pcsc")]
pub use pcsc::PcscReader;
