mod generate;

pub use generate::cmd_generate;
