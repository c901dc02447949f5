mod common;
mod versioned;
