// Neutron-LBaaS v2: the legacy load-balancing service we read from.

pub mod client;
pub mod models;

pub use client::NeutronClient;
