pub mod atp;
pub mod pcr;
