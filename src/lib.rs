//! protoflavor - protocols flavor selection for a sharded database toolchain
//!
//! Picks, once at startup, which wire protocol each role uses: tablet
//! manager, cluster control clients, worker client, query gateway, tablet
//! connections and binlog streaming.

pub mod cli;
pub mod flavor;
pub mod observability;
