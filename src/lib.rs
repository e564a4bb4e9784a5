//!
//! rustmodi solves the [transportation problem](https://en.wikipedia.org/wiki/Transportation_theory_(mathematics))
//! with the North-West Corner rule and the MODI (modified distribution) method
//! over integer or float costs and quantities.
//!
pub mod transport;
