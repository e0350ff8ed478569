// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator math over an oldest-first price slice.
// Nothing here performs I/O or keeps state between calls; every public
// function returns `IndicatorResult<T>` so callers must handle precondition
// and numerical-domain failures explicitly.

pub mod error;
pub mod fractal;
pub mod rolling;
pub mod stats;
