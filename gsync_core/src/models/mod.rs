pub mod remote;
pub mod sync_pair;
