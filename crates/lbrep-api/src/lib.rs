// lbrep-api: async clients for Keystone, Neutron-LBaaS v2 and Octavia v2

pub mod auth;
pub mod error;
pub mod keystone;
pub mod neutron;
pub mod octavia;
mod response;
pub mod transport;

pub use auth::{Credentials, Interface, Service};
pub use error::Error;
pub use keystone::Session;
pub use neutron::NeutronClient;
pub use octavia::OctaviaClient;
pub use transport::{TlsMode, TransportConfig};
