//! Domain types and the ports the pipeline is wired through.

pub mod payment;
pub mod payment_link;
pub mod ports;
pub mod transaction;
pub mod view_state;
