pub mod fasta;
pub mod heartbeat;
