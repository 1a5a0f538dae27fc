pub mod provider;

pub use provider::{
    ProviderReply, ProviderTransport, TransportFault, TransportResult,
};
