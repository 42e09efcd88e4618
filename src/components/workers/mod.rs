// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod copy;
pub mod counter;
pub mod ident;
pub mod json_codec;
pub mod log;
pub mod parallel_flow;
pub mod serial_flow;
pub mod stamp;
#[cfg(test)]
pub(crate) mod testing;

pub use copy::CopyWorker;
pub use counter::CounterWorker;
pub use ident::IdentWorker;
pub use json_codec::{JsonDecodeWorker, JsonEncodeWorker};
pub use log::LogWorker;
pub use parallel_flow::ParallelFlow;
pub use serial_flow::SerialFlow;
pub use stamp::StampWorker;
