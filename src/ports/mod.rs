/// Ports module defining interfaces for hexagonal architecture
///
/// The application core only depends on these traits; adapters provide the
/// file system, network and console implementations.
pub mod outbound;
