//! Real-time push channel

mod socket;

pub use socket::SocketIoPushChannel;
