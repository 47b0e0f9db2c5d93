pub mod provider;


pub use provider::{EthProvider, NetworkError, NetworkManager, RpcFeeSource};
