// Entity Models
// Linked data sources with stable identity and an in-memory registry

pub mod connection;

pub use connection::{Connection, ConnectionKind, ConnectionRegistry, ConnectionStatus};
