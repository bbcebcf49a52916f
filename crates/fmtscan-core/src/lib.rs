//! # fmtscan-core
//!
//! Bounded string formatting and scanning over caller-owned byte buffers:
//! .NET-style brace formatting ([`format_braces`]), printf-style percent
//! formatting ([`format_percent`]), and scanf-style scanning
//! ([`scan_str`]), sharing one numeric rendering core and one type-erased
//! argument list ([`ArgList`]) in place of variadic machinery.
//!
//! Every operation is a synchronous, allocation-free computation: output
//! goes through a single bounded-write primitive that counts logical
//! length past the buffer capacity (snprintf-style truncation detection),
//! and scanning extracts into fixed stack scratch. No `unsafe` code is
//! permitted at the crate level.
//!
//! ```
//! use fmtscan_core::{args, format_braces, format_percent, scan_str};
//!
//! let mut buf = [0u8; 64];
//! let n = format_braces(Some(&mut buf), b"Count: {0} value: {1:F3}",
//!                       &mut args![34i32, 123.456789f64]);
//! assert_eq!(&buf[..n], b"Count: 34 value: 123.457");
//!
//! let n = format_percent(Some(&mut buf), b"Count: %d value: %.3f",
//!                        &mut args![34i32, 123.456789f64]);
//! assert_eq!(&buf[..n], b"Count: 34 value: 123.457");
//!
//! let mut count = 0i32;
//! let mut value = 0f32;
//! let converted = scan_str(b"Count: 34 value: 123.457",
//!                          b"Count: %d value: %f",
//!                          &mut args![&mut count, &mut value]);
//! assert_eq!((converted, count), (2, 34));
//! ```

#![deny(unsafe_code)]

pub mod arg;
pub mod braces;
pub mod buffer;
pub mod convert;
pub mod percent;
pub mod render;
pub mod scan;

pub use arg::{Arg, ArgList, MAX_ARGS};
pub use braces::format_braces;
pub use buffer::OutBuf;
pub use percent::format_percent;
pub use render::RenderFlags;
pub use scan::{SCAN_FAIL, scan_str};
