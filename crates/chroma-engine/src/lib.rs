//! # chroma-engine
//!
//! Multi-representation color conversion engine.
//!
//! Takes one color in exactly one representation and computes every other
//! representation across the requested observers, illuminants, chromatic
//! adaptation transforms and RGB working spaces:
//!
//! - **Input normalizer** - bit depths 8, 15+1, 16 and 32 ([`depth`])
//! - **Model detector** - raw argument groups to one typed input ([`input`])
//! - **Reference registry** - name lookup and the `All` sentinel ([`registry`])
//! - **Result aggregator** - the parallel cross product ([`aggregate`])
//! - **Spectral report** - interpolation, recovery, summary and TM-30
//!
//! # Architecture
//!
//! ```text
//! RawInput ─► detect ─► ColorInput ─┐
//!                                   ├─► Engine::convert ─► ResultSet
//!          ConversionRequest ───────┘          │
//!                                  Registry ───┤
//!                    chroma-color, chroma-spectral
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use chroma_engine::{BitDepth, ConversionRequest, Engine, RawInput, Selection, detect};
//!
//! let raw = RawInput { lab: [Some(52.0), Some(42.5), Some(20.1)], ..Default::default() };
//! let request = ConversionRequest::new(detect(&raw, BitDepth::Eight)?)
//!     .with_illuminant_list("CIE")
//!     .with_cat(Selection::All);
//!
//! let results = Engine::default().convert(&request)?;
//! assert_eq!(results.len(), 21 * 12);
//! # Ok::<(), chroma_engine::EngineError>(())
//! ```
//!
//! # Errors
//!
//! Every failure is an [`EngineError`]; [`EngineError::kind`] classifies it
//! into one of the [`ErrorKind`]s. A run either yields every record or
//! fails as a whole.
//!
//! # Dependencies
//!
//! - [`chroma-color`] - conversion graph and CATs
//! - [`chroma-spectral`] - observers, illuminants, spectra, TM-30
//! - [`chroma-primaries`] - RGB working spaces
//! - `rayon` - tuple fan-out
//! - `tracing` - diagnostics
//!
//! # Used By
//!
//! - `chroma-cli` - command-line front end
//! - `chroma-bench` - benchmarks

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod config;
pub mod depth;
pub mod error;
pub mod input;
pub mod registry;
pub mod request;
pub mod result;

pub use aggregate::{CancelToken, Engine};
pub use config::EngineConfig;
pub use depth::{Axis, BitDepth};
pub use error::{EngineError, EngineResult, ErrorKind};
pub use input::{ColorInput, ColorModel, ColorValue, RawInput, SpectrumArgs, Triplet, detect};
pub use registry::{Registry, Selection};
pub use request::ConversionRequest;
pub use result::{ConversionResult, PrecalculatedData, ResultKey, ResultSet, RgbOutput, SpectralReport};
