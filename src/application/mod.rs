//! Application layer: the QR scanner adapter and the pipeline controller that
//! sequences scanning, parsing and payment submission.

pub mod controller;
pub mod scanner;
