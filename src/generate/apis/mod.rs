pub mod pollinations;
pub mod replicate;
