//! Generic IPv4 subnet arithmetic and port name primitives used by higher-level tools.

pub mod ports;
pub mod subnet;

pub use ports::PortName;
pub use subnet::{subnet_info, subnet_info_from_prefix, SubnetError, SubnetInfo};
