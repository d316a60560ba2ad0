mod locations;
mod pages;
mod pick;
mod resolve;
mod root;

pub use root::Cli;
