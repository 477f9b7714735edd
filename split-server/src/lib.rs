//! Split-ticket finder server.
//!
//! A web application that answers: "Is this train cheaper if I buy two
//! tickets and split the trip at one of its stops?"

pub mod booking;
pub mod domain;
pub mod split;
pub mod vendo;
pub mod web;
